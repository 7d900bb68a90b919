//! Check command implementation.

use super::load_pipeline;
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Execute the check command.
///
/// Builds every processor and returns one report line per processor. Fails
/// the same way `run` would if a dictionary cannot be loaded.
pub fn execute_check(args: CheckArgs) -> Result<Vec<String>> {
    let config = load_pipeline(&args.config, args.dictionary_dir)?;
    config.validate()?;

    let pipeline = Pipeline::build(&config)?;
    let lines = pipeline
        .transforms()
        .iter()
        .enumerate()
        .map(|(index, transform)| {
            let detail = match transform.report() {
                Some(report) => report.summary(),
                None => format!("{} entries", transform.dictionary().len()),
            };
            format!("#{} {}: {}", index, transform.name(), detail)
        })
        .collect();

    Ok(lines)
}
