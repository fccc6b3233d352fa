use alloy_primitives::U256;
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Public mint entry point of the drop contract
    function mint(uint256 count) external payable;
}

/// Mint message for the drop contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintMsg {
    pub count: u64,
}

impl MintMsg {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    /// ABI-encoded calldata: selector followed by the 32-byte count word
    pub fn calldata(&self) -> Vec<u8> {
        mintCall {
            count: U256::from(self.count),
        }
        .abi_encode()
    }

    #[cfg(test)]
    pub fn selector() -> [u8; 4] {
        mintCall::SELECTOR
    }
}

impl Default for MintMsg {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_selector() {
        assert_eq!(hex::encode(MintMsg::selector()), "a0712d68");
    }

    #[test]
    fn test_mint_calldata() {
        let data = MintMsg::default().calldata();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(
            hex::encode(&data),
            format!("a0712d68{:0>64x}", 1)
        );

        let data = MintMsg::new(300).calldata();
        assert_eq!(hex::encode(&data[4..]), format!("{:0>64x}", 300));
    }
}
