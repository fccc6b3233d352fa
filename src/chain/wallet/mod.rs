mod keys;
mod signer;

pub use keys::{address_from_public_key, load_private_keys, EvmWallet};
pub use signer::{keccak256, SignatureParts, TransactionSigner};
