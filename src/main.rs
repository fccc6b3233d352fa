use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mint_runner::chain::{ClientConfig, JsonRpcClient};
use mint_runner::{orchestrator, Config};

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Parser)]
#[command(name = "mint-runner")]
#[command(about = "Mint once from every wallet in a key file on an EVM test network", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the batch (default when no subcommand is given)
    Run {
        /// Configuration file path; built-in defaults are used if it does not exist
        #[arg(short, long, env = "MINT_RUNNER_CONFIG", default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Override the private keys file
        #[arg(short, long)]
        keys: Option<PathBuf>,

        /// Seed for gas padding and pause randomness
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mint_runner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_batch(Path::new(DEFAULT_CONFIG), None, None).await?,
        Some(Commands::Run { config, keys, seed }) => run_batch(&config, keys, seed).await?,
        Some(Commands::Init { output }) => {
            if output.exists() {
                bail!("{} already exists", output.display());
            }
            Config::default().save(&output)?;
            info!("Configuration file created at: {}", output.display());
        }
    }

    Ok(())
}

async fn run_batch(config_path: &Path, keys: Option<PathBuf>, seed: Option<u64>) -> Result<()> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from {}", config_path.display());
        Config::load(config_path)?
    } else {
        info!("No config at {}, using built-in defaults", config_path.display());
        Config::default()
    };

    if let Some(keys) = keys {
        config.runner.private_keys_file = keys;
    }
    if seed.is_some() {
        config.runner.seed = seed;
    }
    config.validate()?;

    info!("RPC: {} (chain {})", config.chain.rpc_url, config.chain.chain_id);
    info!("Contract: {}", config.chain.contract_address);

    let client = JsonRpcClient::new(&ClientConfig {
        rpc_url: config.chain.rpc_url.clone(),
        request_timeout: config.chain.request_timeout,
    })?;

    let rng = match config.runner.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    orchestrator::run(&config, client, rng)
        .await
        .with_context(|| format!("Batch aborted (keys: {})", config.runner.private_keys_file.display()))?;

    Ok(())
}
