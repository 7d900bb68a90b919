//! Command implementations.

pub mod check;
pub mod run;

pub use self::check::execute_check;
pub use self::run::execute_run;

use crate::config::PipelineConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Load a pipeline file and apply the `--dictionary-dir` override.
fn load_pipeline(path: &Path, dictionary_dir: Option<PathBuf>) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::from_file(path)?;
    if let Some(dir) = dictionary_dir {
        config.dictionary_dir = dir;
    }
    Ok(config)
}
