//! kvdict - run dictionary-lookup processors over NDJSON documents.

use anyhow::Context;
use clap::Parser;
use kvdict_cli::logging::init_logging;
use kvdict_cli::{commands, Cli, Command};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Command::Run(args) => {
            let config = args.config.clone();
            commands::execute_run(args)
                .await
                .with_context(|| format!("pipeline {} failed", config.display()))?;
        }
        Command::Check(args) => {
            let config = args.config.clone();
            let lines = commands::execute_check(args)
                .with_context(|| format!("pipeline {} failed to load", config.display()))?;
            for line in lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
