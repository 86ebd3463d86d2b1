use anyhow::Result;
use comfy_table::Table;

use anon_cli::pipeline::{create_config, run_anonymisation};
use anon_cli::types::{ConfigReport, CreateConfigRequest, RunReport, RunRequest};
use anon_model::ColumnAction;

use crate::cli::{CreateConfigArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_actions() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Action", "Description"]);
    apply_table_style(&mut table);
    for action in ColumnAction::ALL {
        table.add_row(vec![action.as_str(), action.description()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_create_config(args: &CreateConfigArgs) -> Result<ConfigReport> {
    create_config(&CreateConfigRequest {
        input: args.input.clone(),
        config: args.config.clone(),
        mode: args.mode.into(),
        force: args.force,
    })
}

pub fn run_run(args: &RunArgs) -> Result<RunReport> {
    run_anonymisation(&RunRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        config: args.config.clone(),
        max_input_size: args.max_input_size,
    })
}
