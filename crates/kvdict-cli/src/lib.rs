//! kvdict CLI library.
//!
//! Drives `kvdictionary` processors over newline-delimited JSON: loads a
//! pipeline file, builds every dictionary once, then processes documents in
//! batches on blocking worker tasks.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod stats;

pub use cli::{Cli, Command};
pub use config::{FailurePolicy, PipelineConfig};
pub use error::{CliError, Result};
pub use pipeline::Pipeline;
pub use stats::PipelineStats;
