//! Export the `OpenAPI` schema for codegen.
//!
//! Usage: `cargo run --bin export_openapi` writes `openapi.yaml` in the working
//! directory. See `--help` for output, format and drift-check options.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use anyhow::{bail, Context};
use clap::Parser;
use docconv_api::{
    config::{Config, ConfigError, DEFAULT_CONFIG_FILE},
    rest::ApiDoc,
    OutputFormat, SchemaExporter,
};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "export_openapi", about = "Write the REST API OpenAPI schema to disk")]
struct Cli {
    /// Destination file (default: openapi.yaml)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format; inferred from the destination extension when omitted
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print the schema to stdout instead of writing a file
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Fail if the destination is missing or differs from the current schema
    #[arg(long)]
    check: bool,

    /// Config file to layer over the defaults; must exist when given
    /// (default: export.yaml, if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Load the named config file, or the optional default one.
    fn load_config(&self) -> Result<Config, ConfigError> {
        match &self.config {
            Some(path) => Config::load_required(path),
            None => Config::load_from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Apply command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output.path = output.display().to_string();
            // A new path re-enables extension inference unless --format is given.
            config.output.format = None;
        }
        if let Some(format) = self.format {
            config.output.format = Some(format);
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let mut config = cli.load_config().map_err(|e| anyhow::anyhow!("{e}"))?;
    cli.apply(&mut config);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    let destination = config.output.path();
    let exporter = SchemaExporter::new(config.output.resolved_format());

    if cli.stdout {
        let rendered = exporter.render(&ApiDoc)?;
        std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("failed to write schema to stdout")?;
        return Ok(());
    }

    if cli.check {
        let outcome = exporter.check(&ApiDoc, &destination)?;
        if !outcome.is_up_to_date() {
            bail!(
                "{} is {outcome:?}; run export_openapi to regenerate it",
                destination.display()
            );
        }
        tracing::info!(path = %destination.display(), "schema is up to date");
        return Ok(());
    }

    exporter.export(&ApiDoc, &destination)?;
    Ok(())
}
