// Library exports for mint_runner

pub mod chain;
pub mod config;
pub mod error;
pub mod orchestrator;

// Re-export main types for convenience
pub use chain::{ChainRpc, EvmWallet, JsonRpcClient};
pub use config::Config;
pub use error::{MintError, MintResult};
pub use orchestrator::{BatchReport, MintOrchestrator};
