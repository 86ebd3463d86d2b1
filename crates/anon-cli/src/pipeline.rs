//! Pipeline stages behind the `create-config` and `run` commands.
//!
//! A run loads the configuration, loads the dataset, resolves the
//! configuration against the schema, anonymises the whole dataset in memory
//! and only then writes the output. Any failure before the final rename
//! leaves no output file behind.

use std::time::Instant;

use anon_ingest::{DatasetFormat, read_dataset_with_limit, read_schema};
use anon_model::{load_config, save_config};
use anon_output::write_dataset;
use anon_transform::{execute, infer_config, resolve};
use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use crate::types::{ConfigReport, CreateConfigRequest, RunReport, RunRequest};

/// Infers a configuration from the input's column names and writes it.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn create_config(request: &CreateConfigRequest) -> Result<ConfigReport> {
    let span = info_span!(
        "create_config",
        input = %request.input.display(),
        mode = %request.mode
    );
    let _guard = span.enter();

    if request.config.exists() && !request.force {
        bail!(
            "config file {} already exists (use --force to overwrite)",
            request.config.display()
        );
    }

    let schema = read_schema(&request.input)
        .with_context(|| format!("read schema of {}", request.input.display()))?;
    let config = infer_config(&schema, request.mode);
    save_config(&config, &request.config)
        .with_context(|| format!("write config {}", request.config.display()))?;

    Ok(ConfigReport {
        path: request.config.clone(),
        mode: request.mode,
        columns: config
            .rules()
            .iter()
            .map(|rule| (rule.column.clone(), rule.action))
            .collect(),
    })
}

/// Anonymises `request.input` into `request.output` using `request.config`.
pub fn run_anonymisation(request: &RunRequest) -> Result<RunReport> {
    let span = info_span!(
        "run",
        input = %request.input.display(),
        output = %request.output.display()
    );
    let _guard = span.enter();
    let run_start = Instant::now();

    let config = load_config(&request.config)
        .with_context(|| format!("load config {}", request.config.display()))?;

    let df = info_span!("ingest").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let df = read_dataset_with_limit(&request.input, request.max_input_size)
            .with_context(|| format!("read {}", request.input.display()))?;
        info!(
            rows = df.height(),
            columns = df.width(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(df)
    })?;

    let schema: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let plan = info_span!("resolve").in_scope(|| -> Result<_> {
        let plan = resolve(&schema, &config).context("resolve configuration")?;
        let groups = plan.groups();
        info!(
            keep = groups.keep.len(),
            hash = groups.hash.len(),
            uuid = groups.uuid.len(),
            account_id = groups.account_id.len(),
            arn = groups.arn.len(),
            "resolve complete"
        );
        Ok(plan)
    })?;

    let execution = execute(&df, &plan).context("anonymise dataset")?;
    let mut data = execution.data;

    let output_format = info_span!("write").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let format = write_dataset(&request.output, &mut data)
            .with_context(|| format!("write {}", request.output.display()))?;
        info!(duration_ms = start.elapsed().as_millis(), "write complete");
        Ok(format)
    })?;

    let dropped_columns = schema
        .iter()
        .filter(|name| plan.action_for(name).is_none())
        .cloned()
        .collect();

    info!(
        rows = data.height(),
        columns = data.width(),
        duration_ms = run_start.elapsed().as_millis(),
        "run complete"
    );

    Ok(RunReport {
        input: request.input.clone(),
        output: request.output.clone(),
        input_format: DatasetFormat::from_path(&request.input),
        output_format,
        rows: data.height(),
        columns: execution.summaries,
        dropped_columns,
    })
}
