use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::demo::register_bookstore;
use crate::config::{load_config, DocConfig};
use crate::document::{ApiDocument, DocumentBuilder};
use crate::logging::{init_logging_with_config, LogConfig};

/// Command-line interface for restdoc
#[derive(Debug, Parser)]
#[command(name = "restdoc")]
#[command(about = "Swagger 2.0 document tooling", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the document of the bundled bookstore API
    Print {
        /// Config file (YAML or JSON); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Host written into the document, overriding `domain_name`
        #[arg(long)]
        host: Option<String>,
    },
    /// Validate a config file and its global parameters
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

fn load_or_default(config: Option<&Path>) -> anyhow::Result<DocConfig> {
    match config {
        Some(path) => load_config(path),
        None => {
            let mut config = DocConfig {
                title: "Bookstore".to_string(),
                version: "v1.0.0".to_string(),
                ..DocConfig::default()
            };
            config.apply_env();
            Ok(config)
        }
    }
}

/// Assemble the bookstore document under `config`.
pub fn build_bookstore(config: DocConfig) -> anyhow::Result<ApiDocument> {
    let mut builder =
        DocumentBuilder::new(config).context("Failed to start the document builder")?;
    register_bookstore(&mut builder)?;
    Ok(builder.finish())
}

/// Execute `cli`, writing command output to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Print {
            config,
            format,
            host,
        } => {
            let config = load_or_default(config.as_deref())?;
            let mut document = build_bookstore(config)?;
            if let Some(host) = host {
                document = document.with_host(host);
            }
            let rendered = match format {
                OutputFormat::Json => document.to_json()?,
                OutputFormat::Yaml => document.to_yaml()?,
            };
            writeln!(out, "{rendered}")?;
        }
        Commands::Check { config } => {
            let loaded = load_config(&config)?;
            let globals = loaded.global_parameters.len();
            let cors = loaded.allow_origin;
            DocumentBuilder::new(loaded)
                .with_context(|| format!("Invalid config: {}", config.display()))?;
            info!(path = %config.display(), globals, cors, "config is valid");
            writeln!(
                out,
                "{}: ok ({globals} global parameters, cors {})",
                config.display(),
                if cors { "enabled" } else { "disabled" }
            )?;
        }
    }
    Ok(())
}

/// Entry point of the `restdoc` binary.
pub fn run_cli() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())?;
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}
