pub mod wallet;
pub mod client;
pub mod messages;
pub mod tx_builder;
pub mod units;
pub mod address;

pub use wallet::{EvmWallet, TransactionSigner};
pub use client::{CallRequest, ChainRpc, ClientConfig, JsonRpcClient};
pub use messages::MintMsg;
pub use tx_builder::{LegacyTransaction, SignedTransaction};
pub use address::parse_contract_address;
