// Error kinds surfaced by the mint pipeline

use std::path::PathBuf;

use alloy_primitives::U256;

use crate::chain::units::format_native;

#[derive(thiserror::Error, Debug)]
pub enum MintError {
    /// Gas estimation failed; the caller falls back to the maximum gas limit
    #[error("gas estimation unavailable: {0}")]
    EstimationUnavailable(String),

    #[error("insufficient funds: need {} {symbol}", format_native(.required, 6))]
    InsufficientFunds {
        required: U256,
        balance: U256,
        symbol: String,
    },

    #[error("broadcast rejected: {0}")]
    BroadcastRejected(String),

    #[error("private key file not found: {}", .path.display())]
    KeyFileMissing { path: PathBuf },

    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("rpc: {0}")]
    Rpc(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl MintError {
    /// Shortfall between the required amount and the balance, if any
    pub fn shortfall(&self) -> Option<U256> {
        match self {
            MintError::InsufficientFunds { required, balance, .. } => {
                Some(required.saturating_sub(*balance))
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MintError {
    fn from(e: reqwest::Error) -> Self {
        MintError::Rpc(e.to_string())
    }
}

impl From<secp256k1::Error> for MintError {
    fn from(e: secp256k1::Error) -> Self {
        MintError::InvalidPrivateKey(e.to_string())
    }
}

pub type MintResult<T> = std::result::Result<T, MintError>;
