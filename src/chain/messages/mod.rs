// Contract call payloads
pub mod mint;

pub use mint::MintMsg;
