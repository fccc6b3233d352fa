use alloy_primitives::U256;
use secp256k1::{Message, Secp256k1, SecretKey};
use tiny_keccak::{Hasher, Keccak};

use crate::error::MintResult;

/// Recoverable ECDSA signature split into EVM components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureParts {
    pub r: U256,
    pub s: U256,
    /// Recovery id parity (0 or 1)
    pub recovery_id: u8,
}

impl SignatureParts {
    /// EIP-155 `v` value for the given chain
    pub fn eip155_v(&self, chain_id: u64) -> u64 {
        chain_id * 2 + 35 + self.recovery_id as u64
    }
}

/// Transaction signer for EVM chains
/// Signs 32-byte Keccak digests with recoverable secp256k1 signatures
pub struct TransactionSigner {
    secp: Secp256k1<secp256k1::All>,
}

impl TransactionSigner {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Sign a pre-computed 32-byte digest
    pub fn sign_hash(&self, hash: &[u8; 32], private_key: &SecretKey) -> MintResult<SignatureParts> {
        let message = Message::from_digest_slice(hash)?;

        // Signatures come out low-s normalized (RFC 6979 nonces)
        let recoverable_sig = self.secp.sign_ecdsa_recoverable(&message, private_key);
        let (recovery_id, compact) = recoverable_sig.serialize_compact();

        Ok(SignatureParts {
            r: U256::from_be_slice(&compact[..32]),
            s: U256::from_be_slice(&compact[32..]),
            recovery_id: (recovery_id.to_i32() % 2) as u8,
        })
    }

    /// Hash bytes with Keccak-256 and sign the digest
    #[cfg(test)]
    pub fn sign_bytes(&self, bytes: &[u8], private_key: &SecretKey) -> MintResult<SignatureParts> {
        self.sign_hash(&keccak256(bytes), private_key)
    }
}

impl Default for TransactionSigner {
    fn default() -> Self {
        Self::new()
    }
}

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(bytes);
    hasher.finalize(&mut hash);
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::wallet::EvmWallet;

    const TEST_KEY: &str = "4646464646464646464646464646464646464646464646464646464646464646";

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_eip155_reference_signature() {
        let wallet = EvmWallet::from_private_key(TEST_KEY).unwrap();
        let private_key = wallet.private_key().unwrap();

        // Signing hash of the EIP-155 example transaction
        let mut hash = [0u8; 32];
        hex::decode_to_slice(
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53",
            &mut hash,
        )
        .unwrap();

        let signer = TransactionSigner::new();
        let sig = signer.sign_hash(&hash, &private_key).unwrap();

        assert_eq!(
            format!("{:x}", sig.r),
            "28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276"
        );
        assert_eq!(
            format!("{:x}", sig.s),
            "67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
        assert_eq!(sig.eip155_v(1), 37);

        // Deterministic nonces give identical signatures
        assert_eq!(sig, signer.sign_hash(&hash, &private_key).unwrap());
    }
}
