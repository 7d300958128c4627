#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "weft_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "weft_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "weft_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %error,
            "command failed"
        );
    }
    eprintln!("Error: {error:#}");

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting weft"
    );
    cli.log();

    let output = cli.command.run(&cli).await?;
    println!("{output}");

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        command = cli.command.name(),
        "command completed"
    );
    Ok(())
}
