use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use anon_cli::types::{ConfigReport, RunReport};
use anon_model::ColumnAction;

pub fn print_run_summary(report: &RunReport) {
    println!(
        "Input: {} ({})",
        report.input.display(),
        report.input_format
    );
    println!(
        "Output: {} ({})",
        report.output.display(),
        report.output_format
    );
    println!("Rows: {}", report.rows);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Action"),
        header_cell("Distinct"),
        header_cell("Account column"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    for summary in &report.columns {
        table.add_row(vec![
            Cell::new(&summary.column),
            action_cell(summary.action),
            summary
                .distinct_values
                .map_or_else(|| dim_cell("-"), Cell::new),
            summary
                .account_column
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    for column in &report.dropped_columns {
        table.add_row(vec![
            dim_cell(column),
            action_cell(ColumnAction::Remove),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} written, {} dropped",
            report.columns.len(),
            report.dropped_columns.len()
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_config_summary(report: &ConfigReport) {
    println!("Config file created at {}", report.path.display());
    println!("Mode: {}", report.mode);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Action")]);
    apply_table_style(&mut table);
    for (column, action) in &report.columns {
        table.add_row(vec![Cell::new(column), action_cell(*action)]);
    }
    println!("{table}");
    let retained = report
        .columns
        .iter()
        .filter(|(_, action)| action.is_retained())
        .count();
    println!(
        "{retained} of {} columns retained. Review the suggested actions before running.",
        report.columns.len()
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::LowerBoundary(Width::Fixed(18)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn action_color(action: ColumnAction) -> Color {
    match action {
        ColumnAction::Keep => Color::Green,
        ColumnAction::Remove => Color::DarkGrey,
        ColumnAction::Hash | ColumnAction::Uuid => Color::Yellow,
        ColumnAction::AwsIdAnonymise | ColumnAction::AwsArnAnonymise => Color::Magenta,
    }
}

fn action_cell(action: ColumnAction) -> Cell {
    Cell::new(action.as_str()).fg(action_color(action))
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
