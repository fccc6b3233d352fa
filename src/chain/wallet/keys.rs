use std::path::Path;

use alloy_primitives::Address;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{MintError, MintResult};

/// Wallet for an EVM account, built from a raw private key
/// Private key bytes are wiped when the wallet is dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EvmWallet {
    #[zeroize(skip)] // Public data doesn't need zeroizing
    pub address: Address,

    private_key_bytes: [u8; 32],
}

impl EvmWallet {
    /// Create a wallet from a hex private key, with or without `0x` prefix
    pub fn from_private_key(private_key: &str) -> MintResult<Self> {
        let trimmed = private_key.trim();
        let stripped = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if stripped.len() != 64 {
            return Err(MintError::InvalidPrivateKey(format!(
                "expected 64 hex characters, got {}",
                stripped.len()
            )));
        }

        let mut private_key_bytes = [0u8; 32];
        hex::decode_to_slice(stripped, &mut private_key_bytes)
            .map_err(|e| MintError::InvalidPrivateKey(e.to_string()))?;

        let secp = Secp256k1::new();
        let secret_key = match SecretKey::from_slice(&private_key_bytes) {
            Ok(key) => key,
            Err(e) => {
                private_key_bytes.zeroize();
                return Err(e.into());
            }
        };
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);

        Ok(Self {
            address: address_from_public_key(&public_key),
            private_key_bytes,
        })
    }

    /// Get the private key as a SecretKey (for signing)
    pub fn private_key(&self) -> MintResult<SecretKey> {
        Ok(SecretKey::from_slice(&self.private_key_bytes)?)
    }

    /// EIP-55 checksummed address
    pub fn checksum_address(&self) -> String {
        self.address.to_checksum(None)
    }
}

impl std::fmt::Debug for EvmWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Ethereum address: last 20 bytes of keccak256 over the uncompressed public key coordinates
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    // Skip the 0x04 prefix byte, take only the X,Y coordinates (64 bytes)
    let pubkey_bytes = public_key.serialize_uncompressed();
    let coords = &pubkey_bytes[1..];

    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(coords);
    hasher.finalize(&mut hash);

    Address::from_slice(&hash[12..32])
}

/// Load private keys from a newline-delimited file
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Keys are
/// returned as raw strings so that a malformed line still maps to one
/// wallet slot in the batch.
pub fn load_private_keys<P: AsRef<Path>>(path: P) -> MintResult<Vec<Zeroizing<String>>> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => Zeroizing::new(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MintError::KeyFileMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| Zeroizing::new(line.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Sender key from the EIP-155 example transaction
    const TEST_KEY: &str = "4646464646464646464646464646464646464646464646464646464646464646";

    #[test]
    fn test_address_derivation() {
        let wallet = EvmWallet::from_private_key(TEST_KEY).unwrap();
        assert_eq!(
            wallet.checksum_address(),
            "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F"
        );
    }

    #[test]
    fn test_prefixed_and_padded_keys() {
        let plain = EvmWallet::from_private_key(TEST_KEY).unwrap();
        let prefixed = EvmWallet::from_private_key(&format!("  0x{}\n", TEST_KEY)).unwrap();
        assert_eq!(plain.address, prefixed.address);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(matches!(
            EvmWallet::from_private_key("0x1234"),
            Err(MintError::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            EvmWallet::from_private_key(&"zz".repeat(32)),
            Err(MintError::InvalidPrivateKey(_))
        ));
        // Zero is not a valid secp256k1 scalar
        assert!(matches!(
            EvmWallet::from_private_key(&"00".repeat(32)),
            Err(MintError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0x{}", TEST_KEY).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "# spare wallet").unwrap();
        writeln!(file, "  {}  ", "11".repeat(32)).unwrap();

        let keys = load_private_keys(file.path()).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].as_str(), format!("0x{}", TEST_KEY));
        assert_eq!(keys[1].as_str(), "11".repeat(32));
    }

    #[test]
    fn test_missing_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private_keys.txt");
        match load_private_keys(&path) {
            Err(MintError::KeyFileMissing { path: missing }) => assert_eq!(missing, path),
            other => panic!("expected KeyFileMissing, got {:?}", other),
        }
    }
}
