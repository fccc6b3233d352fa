/// Legacy (type 0) EVM transactions with EIP-155 replay protection

use alloy_primitives::{Address, Bytes, U256};
use alloy_rlp::{BufMut, Encodable, Header};

use crate::chain::wallet::{keccak256, EvmWallet, SignatureParts, TransactionSigner};
use crate::error::MintResult;

/// Unsigned legacy transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
}

/// Signed, RLP-encoded transaction ready for `eth_sendRawTransaction`
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub raw: Vec<u8>,
    pub hash: [u8; 32],
}

impl SignedTransaction {
    /// `0x`-prefixed raw transaction hex
    pub fn raw_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }
}

impl LegacyTransaction {
    fn base_fields_length(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
    }

    fn encode_base_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    /// RLP of `[nonce, gasPrice, gas, to, value, data, chainId, 0, 0]`
    pub fn signing_payload(&self) -> Vec<u8> {
        let payload_length =
            self.base_fields_length() + self.chain_id.length() + 0u8.length() * 2;

        let mut out = Vec::with_capacity(payload_length + 4);
        Header {
            list: true,
            payload_length,
        }
        .encode(&mut out);
        self.encode_base_fields(&mut out);
        self.chain_id.encode(&mut out);
        0u8.encode(&mut out);
        0u8.encode(&mut out);
        out
    }

    /// Digest that the sender signs
    pub fn signing_hash(&self) -> [u8; 32] {
        keccak256(&self.signing_payload())
    }

    /// RLP of `[nonce, gasPrice, gas, to, value, data, v, r, s]`
    pub fn encode_signed(&self, signature: &SignatureParts) -> Vec<u8> {
        let v = signature.eip155_v(self.chain_id);
        let payload_length = self.base_fields_length()
            + v.length()
            + signature.r.length()
            + signature.s.length();

        let mut out = Vec::with_capacity(payload_length + 4);
        Header {
            list: true,
            payload_length,
        }
        .encode(&mut out);
        self.encode_base_fields(&mut out);
        v.encode(&mut out);
        signature.r.encode(&mut out);
        signature.s.encode(&mut out);
        out
    }

    /// Sign with the wallet key and produce the raw transaction
    pub fn sign(&self, wallet: &EvmWallet, signer: &TransactionSigner) -> MintResult<SignedTransaction> {
        let private_key = wallet.private_key()?;
        let signature = signer.sign_hash(&self.signing_hash(), &private_key)?;

        let raw = self.encode_signed(&signature);
        let hash = keccak256(&raw);
        Ok(SignedTransaction { raw, hash })
    }

    /// Total wei the sender must hold: value + gas_limit * gas_price
    pub fn max_cost(&self) -> U256 {
        self.value
            .saturating_add(self.gas_price.saturating_mul(U256::from(self.gas_limit)))
    }
}
