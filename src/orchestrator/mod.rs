//! Mint Orchestrator - drives one mint per wallet across the key list
//!
//! Wallets are processed strictly in order: each transaction is built,
//! signed and broadcast before the next wallet starts, since every wallet
//! reads its own nonce from the chain.

pub mod gas;
pub mod results;
pub mod stats;

use std::io::Write;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use chrono::Local;
use rand::Rng;
use tracing::{error, info, warn};
use zeroize::Zeroizing;

use crate::chain::units::format_gwei;
use crate::chain::wallet::load_private_keys;
use crate::chain::{
    parse_contract_address, CallRequest, ChainRpc, EvmWallet, LegacyTransaction, MintMsg,
    TransactionSigner,
};
use crate::config::Config;
use crate::error::{MintError, MintResult};

pub use gas::{GasPolicy, GasSizing};
pub use results::{MintStatus, ResultRecord, ResultWriter, INVALID_KEY_LABEL};
pub use stats::BatchReport;

/// Per-transaction parameters shared by every wallet in the batch
#[derive(Debug, Clone)]
pub struct MintParams {
    pub chain_id: u64,
    pub contract: Address,
    pub value: U256,
    pub count: u64,
    pub gas_price_multiplier_bps: u32,
    pub symbol: String,
}

impl MintParams {
    pub fn from_config(config: &Config) -> MintResult<Self> {
        let chain = &config.chain;
        let value = alloy_primitives::utils::parse_ether(&chain.mint_value)
            .map_err(|e| MintError::InvalidConfig(format!("mint value {:?}: {}", chain.mint_value, e)))?;

        Ok(Self {
            chain_id: chain.chain_id,
            contract: parse_contract_address(&chain.contract_address)?,
            value,
            count: chain.mint_count,
            gas_price_multiplier_bps: chain.gas_price_multiplier_bps,
            symbol: chain.native_symbol.clone(),
        })
    }

    /// Network gas price scaled by the configured bump, truncated
    pub fn bumped_gas_price(&self, network_price: U256) -> U256 {
        network_price.saturating_mul(U256::from(self.gas_price_multiplier_bps)) / U256::from(10_000u64)
    }
}

/// Successful broadcast details
#[derive(Debug, Clone)]
pub struct MintReceipt {
    /// Hash reported by the node
    pub tx_hash: String,
    /// Keccak-256 of the raw transaction we signed
    pub local_hash: String,
    pub nonce: u64,
    pub gas_price: U256,
    pub base_gas: Option<u64>,
    pub gas: GasSizing,
}

/// Runs mint transactions for a list of wallets
pub struct MintOrchestrator<C: ChainRpc, R: Rng> {
    client: C,
    rng: R,
    params: MintParams,
    gas_policy: GasPolicy,
    delay_min_secs: u64,
    delay_max_secs: u64,
    signer: TransactionSigner,
}

impl<C: ChainRpc, R: Rng> MintOrchestrator<C, R> {
    pub fn new(config: &Config, client: C, rng: R) -> MintResult<Self> {
        config
            .validate()
            .map_err(|e| MintError::InvalidConfig(format!("{:#}", e)))?;

        Ok(Self {
            client,
            rng,
            params: MintParams::from_config(config)?,
            gas_policy: config.gas.clone(),
            delay_min_secs: config.runner.delay_min_secs,
            delay_max_secs: config.runner.delay_max_secs,
            signer: TransactionSigner::new(),
        })
    }

    pub fn params(&self) -> &MintParams {
        &self.params
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Build, sign and broadcast one mint from `wallet`
    pub async fn mint_token(&mut self, wallet: &EvmWallet) -> MintResult<MintReceipt> {
        let address = wallet.address;

        let network_price = self.client.gas_price().await?;
        let gas_price = self.params.bumped_gas_price(network_price);
        let nonce = self.client.transaction_count(address).await?;
        let input = Bytes::from(MintMsg::new(self.params.count).calldata());

        let call = CallRequest {
            from: address,
            to: self.params.contract,
            data: input.clone(),
            value: self.params.value,
        };
        let base_gas = match self.client.estimate_gas(&call).await {
            Ok(estimate) => Some(estimate),
            Err(e) => {
                warn!("Gas estimation failed, using max gas limit: {}", e);
                None
            }
        };

        let gas = self.gas_policy.size(base_gas, &mut self.rng);
        info!(
            "Gas: base={} custom={} multiplier={:.3}x",
            base_gas.map_or_else(|| "none".to_string(), |g| g.to_string()),
            gas.gas_limit,
            gas.multiplier
        );

        let tx = LegacyTransaction {
            chain_id: self.params.chain_id,
            nonce,
            gas_price,
            gas_limit: gas.gas_limit,
            to: self.params.contract,
            value: self.params.value,
            input,
        };

        let balance = self.client.balance(address).await?;
        let required = tx.max_cost();
        if balance < required {
            return Err(MintError::InsufficientFunds {
                required,
                balance,
                symbol: self.params.symbol.clone(),
            });
        }

        let signed = tx.sign(wallet, &self.signer)?;
        let tx_hash = self
            .client
            .send_raw_transaction(&signed.raw)
            .await
            .map_err(|e| match e {
                MintError::BroadcastRejected(_) => e,
                other => MintError::BroadcastRejected(other.to_string()),
            })?;

        let local_hash = signed.hash_hex();
        if !tx_hash.eq_ignore_ascii_case(&local_hash) {
            warn!("Node returned hash {} but signed transaction hashes to {}", tx_hash, local_hash);
        }

        Ok(MintReceipt {
            tx_hash,
            local_hash,
            nonce,
            gas_price,
            base_gas,
            gas,
        })
    }

    /// Process every key once, appending one row per key to `writer`
    pub async fn run_batch<W: Write>(
        &mut self,
        keys: &[Zeroizing<String>],
        writer: &mut ResultWriter<W>,
    ) -> MintResult<BatchReport> {
        let mut report = BatchReport::default();
        let total = keys.len();

        for (idx, key) in keys.iter().enumerate() {
            let record = match EvmWallet::from_private_key(key) {
                Ok(wallet) => self.process_wallet(idx, total, &wallet).await,
                Err(e) => {
                    error!("[{}/{}] Skipping unreadable key: {}", idx + 1, total, e);
                    ResultRecord {
                        address: INVALID_KEY_LABEL.to_string(),
                        status: MintStatus::Failed(e.to_string()),
                        balance: None,
                        tx_hash: None,
                    }
                }
            };

            writer.append(&record)?;
            let succeeded = record.status.is_success();
            report.records.push(record);

            if succeeded && idx + 1 < total {
                let pause = self.draw_pause();
                info!("Pausing {} sec...", pause.as_secs());
                tokio::time::sleep(pause).await;
                report.pauses.push(pause);
            }
        }

        Ok(report)
    }

    async fn process_wallet(&mut self, idx: usize, total: usize, wallet: &EvmWallet) -> ResultRecord {
        let address = wallet.checksum_address();
        info!("[{}/{}] Processing {}", idx + 1, total, address);

        let (status, tx_hash) = match self.mint_token(wallet).await {
            Ok(receipt) => {
                info!("TX Hash: {}", receipt.tx_hash);
                (MintStatus::Success, Some(receipt.tx_hash))
            }
            Err(e) => {
                warn!("Error: {}", e);
                (MintStatus::Failed(e.to_string()), None)
            }
        };

        // Balance is re-read whatever the outcome
        let balance = match self.client.balance(wallet.address).await {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!("Failed to read balance for {}: {}", address, e);
                None
            }
        };

        ResultRecord {
            address,
            status,
            balance,
            tx_hash,
        }
    }

    fn draw_pause(&mut self) -> Duration {
        let secs = if self.delay_max_secs <= self.delay_min_secs {
            self.delay_min_secs
        } else {
            self.rng.gen_range(self.delay_min_secs..=self.delay_max_secs)
        };
        Duration::from_secs(secs)
    }
}

/// Full batch: load keys, open the results file, mint for every wallet
pub async fn run<C: ChainRpc, R: Rng>(config: &Config, client: C, rng: R) -> MintResult<BatchReport> {
    let keys = load_private_keys(&config.runner.private_keys_file)?;
    let mut orchestrator = MintOrchestrator::new(config, client, rng)?;

    let (mut writer, path) = ResultWriter::create_in(
        &config.runner.results_dir,
        &orchestrator.params().symbol,
        &Local::now(),
    )?;

    info!("Wallets found: {}", keys.len());
    match orchestrator.client().gas_price().await {
        Ok(price) => info!("Current gas price: {} Gwei", format_gwei(&price, 2)),
        Err(e) => warn!("Failed to read current gas price: {}", e),
    }

    let mut report = orchestrator.run_batch(&keys, &mut writer).await?;
    report.results_path = Some(path.clone());

    info!(
        "Done: {} succeeded, {} failed, {} rows written, {} sec paused. Results saved to {}",
        report.succeeded(),
        report.failed(),
        writer.rows(),
        report.total_paused().as_secs(),
        path.display()
    );
    Ok(report)
}
