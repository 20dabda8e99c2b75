//! # fhir-cli
//!
//! Command-line interface for the conformance engine: validate a local JSON
//! resource file against the built-in catalog, or list the registered types.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fhir_validation::{ConformanceEngine, ConformanceReporter};
use std::fs;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fhir")]
#[command(about = "Conformance checker for FHIR-style JSON resources")]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Validate a JSON resource file against a registered schema
    Validate {
        /// Input file path
        input: String,

        /// Resource type to validate against; inferred from the
        /// resourceType field when omitted
        #[arg(short = 't', long)]
        resource_type: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// List the registered resource and datatype schemas
    Types,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(Cli::parse()) {
        Ok(valid) => {
            if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let engine = ConformanceEngine::with_default_catalog()?;

    match cli.command {
        Commands::Validate {
            input,
            resource_type,
            format,
        } => {
            let content =
                fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
            let value: serde_json::Value =
                serde_json::from_str(&content).with_context(|| format!("parsing {input}"))?;

            let type_name = match resource_type {
                Some(name) => name,
                None => value
                    .get("resourceType")
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string)
                    .context("no --resource-type given and no resourceType field in input")?,
            };

            tracing::info!(input = %input, type_name = %type_name, "validating");
            let result = engine.conformance(&value, &type_name)?;

            let reporter = ConformanceReporter::new();
            match format {
                Format::Text => print!("{}", reporter.format_text(&result)),
                Format::Json => println!("{}", reporter.format_json(&result)?),
            }
            Ok(result.is_valid)
        }
        Commands::Types => {
            for name in engine.registry().type_names() {
                println!("{name}");
            }
            Ok(true)
        }
    }
}
