use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chain::parse_contract_address;
use crate::orchestrator::gas::GasPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chain: ChainConfig,
    pub gas: GasPolicy,
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub contract_address: String,
    /// Value attached to each mint, in whole native units (e.g. "0.01")
    pub mint_value: String,
    pub mint_count: u64,
    /// Bump over the network gas price in basis points (11500 = 115%)
    pub gas_price_multiplier_bps: u32,
    pub native_symbol: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub private_keys_file: PathBuf,
    pub results_dir: PathBuf,
    /// Pause bounds between successful wallets, in seconds (inclusive)
    pub delay_min_secs: u64,
    pub delay_max_secs: u64,
    /// Fixed RNG seed for reproducible gas padding and pauses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet-rpc.monad.xyz".to_string(),
            chain_id: 10143,
            contract_address: "0xD97BCe4518b886A36e345764333d77b5fAF6FE2C".to_string(),
            mint_value: "0.01".to_string(),
            mint_count: 1,
            gas_price_multiplier_bps: 11_500,
            native_symbol: "MON".to_string(),
            request_timeout: 30,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            private_keys_file: PathBuf::from("private_keys.txt"),
            results_dir: PathBuf::from("."),
            delay_min_secs: 20,
            delay_max_secs: 28,
            seed: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the configuration before any wallet is touched
    pub fn validate(&self) -> Result<()> {
        parse_contract_address(&self.chain.contract_address)?;

        if self.chain.chain_id == 0 {
            bail!("chain_id must be non-zero");
        }
        if self.chain.mint_count == 0 {
            bail!("mint_count must be at least 1");
        }
        if self.chain.gas_price_multiplier_bps == 0 {
            bail!("gas_price_multiplier_bps must be non-zero");
        }
        if let Err(e) = alloy_primitives::utils::parse_ether(&self.chain.mint_value) {
            bail!("Invalid mint_value {:?}: {}", self.chain.mint_value, e);
        }

        if let Err(reason) = self.gas.validate() {
            bail!(reason);
        }

        if self.runner.delay_min_secs > self.runner.delay_max_secs {
            bail!(
                "delay_min_secs {} exceeds delay_max_secs {}",
                self.runner.delay_min_secs,
                self.runner.delay_max_secs
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();

        assert_eq!(config.chain.chain_id, 10143);
        assert_eq!(config.gas.min_gas_limit, 96_258);
        assert_eq!(config.gas.max_gas_limit, 250_000);
        assert_eq!(config.runner.delay_min_secs, 20);
        assert_eq!(config.runner.delay_max_secs, 28);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.runner.seed = Some(99);
        config.gas.max_gas_limit = 300_000;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.runner.seed, Some(99));
        assert_eq!(loaded.gas, config.gas);
        assert_eq!(loaded.chain.contract_address, config.chain.contract_address);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [runner]
            delay_min_secs = 1
            delay_max_secs = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.runner.delay_max_secs, 2);
        assert_eq!(config.runner.private_keys_file, PathBuf::from("private_keys.txt"));
        assert_eq!(config.chain.native_symbol, "MON");
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = Config::default();
        config.chain.contract_address = "0xD97BCe4518b886A36e345764333d77b5fAF6FE".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.runner.delay_min_secs = 30;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.chain.mint_value = "ten".to_string();
        assert!(config.validate().is_err());
    }
}
