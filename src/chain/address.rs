use alloy_primitives::Address;

use crate::error::{MintError, MintResult};

/// Parse and validate a contract address
///
/// Requires a `0x` prefix and exactly 40 hex digits. Mixed-case input must
/// carry a valid EIP-55 checksum; all-lowercase or all-uppercase input is
/// accepted as unchecksummed.
pub fn parse_contract_address(input: &str) -> MintResult<Address> {
    let invalid = |reason: String| MintError::InvalidAddress {
        address: input.to_string(),
        reason,
    };

    let digits = input
        .strip_prefix("0x")
        .ok_or_else(|| invalid("missing 0x prefix".to_string()))?;

    if digits.len() != 40 {
        return Err(invalid(format!("expected 40 hex digits, got {}", digits.len())));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("contains non-hex characters".to_string()));
    }

    let address: Address = input
        .parse()
        .map_err(|e| invalid(format!("{}", e)))?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let expected = address.to_checksum(None);
        if expected != input {
            return Err(invalid(format!("checksum mismatch, expected {}", expected)));
        }
    }

    Ok(address)
}
