use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use registry_tools::logging::setup_logging;
use registry_tools::{simulate, Config, DeployPlan, Seed};

#[derive(Parser)]
#[command(name = "registry")]
#[command(about = "Deployment tools for the contract registry")]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a seed file offline
    Check {
        #[arg(short, long)]
        seed: PathBuf,
    },
    /// Instantiate the registry in an in-process sandbox with a seed
    Simulate {
        #[arg(short, long)]
        seed: PathBuf,
    },
    /// Deploy the registry to the configured network
    Deploy {
        #[arg(short, long)]
        seed: PathBuf,
        /// Compiled registry WASM
        #[arg(short, long)]
        wasm: PathBuf,
        /// Signing identity; defaults to SOROBAN_ACCOUNT
        #[arg(long)]
        source: Option<String>,
        /// Print the stellar CLI invocation instead of running it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the resolved network configuration
    Config {
        #[arg(long)]
        json: bool,
    },
}

fn load_seed(path: &Path) -> Result<Seed> {
    Seed::from_path(path).with_context(|| format!("reading seed {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    match cli.command {
        Commands::Check { seed } => {
            let parsed = load_seed(&seed)?;
            parsed.validate()?;
            info!(
                entries = parsed.entries.len(),
                loop_limit = parsed.loop_limit,
                "seed is valid"
            );
        }
        Commands::Simulate { seed } => {
            let parsed = load_seed(&seed)?;
            let report = simulate(&parsed)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Deploy {
            seed,
            wasm,
            source,
            dry_run,
        } => {
            let config = Config::load()?;
            config.log_summary();

            let parsed = load_seed(&seed)?;
            let plan = DeployPlan::build(&config, &parsed, &wasm, source.as_deref())?;
            if dry_run {
                println!("{}", plan.render());
            } else {
                let contract_id = plan.execute().await?;
                println!("{contract_id}");
            }
        }
        Commands::Config { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", config.to_json()?);
            } else {
                config.log_summary();
            }
        }
    }

    Ok(())
}
