//! Run command implementation.

use super::load_pipeline;
use crate::cli::RunArgs;
use crate::error::Result;
use crate::pipeline::{run_batches, Pipeline};
use crate::stats::PipelineStats;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

/// Execute the run command.
///
/// Reads NDJSON from `--input` (or stdin), runs every document through the
/// pipeline and writes the result to `--output` (or stdout).
pub async fn execute_run(args: RunArgs) -> Result<PipelineStats> {
    let mut config = load_pipeline(&args.config, args.dictionary_dir)?;
    if let Some(policy) = args.on_failure {
        config.on_failure = policy.into();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.validate()?;

    let pipeline = Arc::new(Pipeline::build(&config)?);

    let input = match &args.input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let output = run_batches(pipeline, &input, config.batch_size, config.workers).await?;

    let mut text = String::with_capacity(input.len());
    for line in &output.lines {
        text.push_str(line);
        text.push('\n');
    }

    match &args.output {
        Some(path) => tokio::fs::write(path, text).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!(
        documents_in = output.stats.documents_in,
        documents_out = output.stats.documents_out,
        failed = output.stats.failed,
        "Run complete"
    );

    if args.summary {
        eprintln!("{}", output.stats.summary());
    }

    Ok(output.stats)
}
