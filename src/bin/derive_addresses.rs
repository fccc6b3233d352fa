/// Print the checksummed address for every key in a key file, offline
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use mint_runner::chain::wallet::load_private_keys;
use mint_runner::orchestrator::INVALID_KEY_LABEL;
use mint_runner::EvmWallet;

#[derive(Parser, Debug)]
#[command(name = "derive_addresses")]
#[command(about = "Derive wallet addresses from a private key file", long_about = None)]
struct Args {
    /// Path to the newline-delimited private key file
    #[arg(default_value = "private_keys.txt")]
    keys: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let keys = load_private_keys(&args.keys)?;

    println!("Found {} keys in {}", keys.len(), args.keys.display());
    for (idx, key) in keys.iter().enumerate() {
        match EvmWallet::from_private_key(key) {
            Ok(wallet) => println!("{:>4}  {}", idx + 1, wallet.checksum_address()),
            Err(e) => println!("{:>4}  {} ({})", idx + 1, INVALID_KEY_LABEL, e),
        }
    }

    Ok(())
}
