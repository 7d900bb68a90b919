//! CLI command definitions and argument parsing.

use crate::config::FailurePolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kvdict - Run dictionary-lookup processors over NDJSON documents.
#[derive(Debug, Parser)]
#[command(name = "kvdict")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (overridden by RUST_LOG when set)
    #[arg(short, long, value_enum, global = true, default_value = "warn")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug output, including every malformed dictionary line
    Debug,
    /// Everything, including skipped documents
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process NDJSON documents through the pipeline
    Run(RunArgs),

    /// Build every dictionary of the pipeline and report on it
    Check(CheckArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Pipeline file (TOML)
    #[arg(short, long, env = "KVDICT_PIPELINE")]
    pub config: PathBuf,

    /// Override the dictionary directory from the pipeline file
    #[arg(short, long, env = "KVDICT_DICTIONARY_DIR")]
    pub dictionary_dir: Option<PathBuf>,

    /// Input NDJSON file (stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output NDJSON file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the failure policy
    #[arg(long, value_enum)]
    pub on_failure: Option<CliFailurePolicy>,

    /// Override the number of concurrent batches
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print the run summary to stderr
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Pipeline file (TOML)
    #[arg(short, long, env = "KVDICT_PIPELINE")]
    pub config: PathBuf,

    /// Override the dictionary directory from the pipeline file
    #[arg(short, long, env = "KVDICT_DICTIONARY_DIR")]
    pub dictionary_dir: Option<PathBuf>,
}

/// Failure policy options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFailurePolicy {
    /// Abort on the first failing document
    Fail,
    /// Drop failing documents
    Skip,
    /// Emit failing documents unchanged
    Keep,
}

impl From<CliFailurePolicy> for FailurePolicy {
    fn from(policy: CliFailurePolicy) -> Self {
        match policy {
            CliFailurePolicy::Fail => FailurePolicy::Fail,
            CliFailurePolicy::Skip => FailurePolicy::Skip,
            CliFailurePolicy::Keep => FailurePolicy::Keep,
        }
    }
}
