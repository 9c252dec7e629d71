//! envstack command-line interface.
//!
//! Commands mirror the lifecycle of a deployment configuration: `load` to
//! resolve it, `validate` to check it, `show`/`ports` to inspect it, `docker`
//! to emit the merged container environment file, and `check` to run the full
//! cross-service validation suite.

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envstack::config::{load_environment, Environment, LoadOutcome};
use envstack::validate::{validate_config, ProjectValidator};
use envstack::{emit, report};

#[derive(Parser)]
#[command(name = "envstack", version)]
#[command(about = "Layered environment configuration manager for multi-service deployments")]
struct Cli {
    /// Project root containing the .env files
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and resolve the merged configuration
    Load {
        /// Target environment (development, dev, production, prod)
        #[arg(default_value = "development")]
        environment: String,
    },

    /// Load, then check required variables, ports, and database settings
    Validate {
        #[arg(default_value = "development")]
        environment: String,
    },

    /// Display the resolved configuration grouped by category
    Show {
        #[arg(default_value = "development")]
        environment: String,

        /// Dump the raw resolved mapping as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Validate and write the merged container environment file
    Docker {
        #[arg(default_value = "development")]
        environment: String,
    },

    /// List every configured port, sorted
    Ports {
        #[arg(default_value = "development")]
        environment: String,
    },

    /// Run the full cross-service validation suite
    Check,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("envstack=warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Load { environment } => {
            let (environment, outcome) = load(&cli.root, &environment)?;
            println!(
                "loaded {} configuration entries for {environment}",
                outcome.config.len()
            );
        }
        Commands::Validate { environment } => {
            let (_, outcome) = load(&cli.root, &environment)?;
            let findings = validate_config(&outcome.config);
            report::print_findings(&findings);
            if findings.has_errors() {
                bail!("configuration validation failed");
            }
        }
        Commands::Show { environment, json } => {
            let (environment, outcome) = load(&cli.root, &environment)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.config)?);
            } else {
                report::print_config(&outcome.config, environment);
            }
        }
        Commands::Docker { environment } => {
            let (environment, outcome) = load(&cli.root, &environment)?;
            let findings = validate_config(&outcome.config);
            if findings.has_errors() {
                report::print_findings(&findings);
                bail!("validation failed, refusing to generate {}", emit::OUTPUT_FILE);
            }
            let path = emit::write_docker_env(&outcome.config, environment, &cli.root)?;
            println!("generated {}", path.display());
        }
        Commands::Ports { environment } => {
            let (environment, outcome) = load(&cli.root, &environment)?;
            report::print_ports(&outcome.config, environment);
        }
        Commands::Check => {
            let findings = ProjectValidator::new(&cli.root).run();
            report::print_findings(&findings);
            if findings.has_errors() {
                bail!("configuration validation failed");
            }
        }
    }
    Ok(())
}

/// Loads an environment and surfaces its non-fatal warnings.
fn load(root: &Path, name: &str) -> anyhow::Result<(Environment, LoadOutcome)> {
    let (environment, outcome) = load_environment(root, name)?;
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    Ok((environment, outcome))
}
