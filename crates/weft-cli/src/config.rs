//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── command: Command          # compile, export, aggregate, publish, health
//! ├── export: ExportConfig      # workflow node namespace
//! ├── engine: EngineConfig      # execution engine host, port, token
//! └── sparql: SparqlConfig      # SPARQL endpoint, graph, credentials
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

use std::process;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use weft_engine::reqwest::EngineConfig;
use weft_semantic::ExportConfig;
use weft_semantic::reqwest::SparqlConfig;

use crate::TRACING_TARGET_CONFIG;
use crate::command::Command;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "weft")]
#[command(about = "Compile, export and inspect workflow graphs")]
#[command(version)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,

    /// RDF export configuration.
    #[clap(flatten)]
    pub export: ExportConfig,

    /// Execution engine connection.
    #[clap(flatten)]
    pub engine: EngineConfig,

    /// SPARQL endpoint connection.
    #[clap(flatten)]
    pub sparql: SparqlConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr so command output on stdout stays machine-readable.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            command = self.command.name(),
            namespace = %self.export.namespace,
            "Command configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            engine_host = %self.engine.host,
            engine_port = self.engine.port,
            engine_timeout_secs = self.engine.timeout_secs,
            engine_token_set = !self.engine.token.is_empty(),
            "Engine configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            sparql_endpoint = %self.sparql.endpoint,
            sparql_graph = %self.sparql.graph,
            sparql_username = ?self.sparql.username,
            sparql_timeout_secs = self.sparql.timeout_secs,
            "SPARQL configuration"
        );
    }
}

/// Returns a list of enabled compile-time features.
fn enabled_features() -> Vec<&'static str> {
    [cfg!(feature = "dotenv").then_some("dotenv")]
        .into_iter()
        .flatten()
        .collect()
}
