/// Fixed-precision rendering of wei amounts
use alloy_primitives::U256;

pub const NATIVE_DECIMALS: u8 = 18;
pub const GWEI_DECIMALS: u8 = 9;

/// Render an amount of base units as a decimal with `precision` fractional
/// digits, rounding half to even (the same result as Python's `Decimal`
/// formatting).
pub fn format_units_rounded(amount: &U256, decimals: u8, precision: u8) -> String {
    let precision = precision.min(decimals);
    let drop = U256::from(10u64).pow(U256::from(decimals - precision));

    let mut scaled = *amount / drop;
    let twice_rem = (*amount % drop) * U256::from(2u64);
    if twice_rem > drop || (twice_rem == drop && scaled.bit(0)) {
        scaled += U256::from(1u64);
    }

    if precision == 0 {
        return scaled.to_string();
    }

    let unit = U256::from(10u64).pow(U256::from(precision));
    let whole = scaled / unit;
    let frac = scaled % unit;
    format!("{}.{:0>width$}", whole, frac.to_string(), width = precision as usize)
}

/// Render wei as whole native units (18 decimals)
pub fn format_native(amount: &U256, precision: u8) -> String {
    format_units_rounded(amount, NATIVE_DECIMALS, precision)
}

/// Render wei as Gwei
pub fn format_gwei(amount: &U256, precision: u8) -> String {
    format_units_rounded(amount, GWEI_DECIMALS, precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_formatting() {
        let one_hundredth = U256::from(10_000_000_000_000_000u64);
        assert_eq!(format_native(&one_hundredth, 6), "0.010000");
        assert_eq!(format_native(&U256::ZERO, 6), "0.000000");

        let amount = U256::from(1_234_567_890_123_456_789u64);
        assert_eq!(format_native(&amount, 6), "1.234568");
        assert_eq!(format_native(&amount, 0), "1");
    }

    #[test]
    fn test_gwei_formatting() {
        // 52.5 Gwei
        let price = U256::from(52_500_000_000u64);
        assert_eq!(format_gwei(&price, 2), "52.50");

        // ties go to the even digit
        assert_eq!(format_gwei(&U256::from(1_005_000_000u64), 2), "1.00");
        assert_eq!(format_gwei(&U256::from(1_015_000_000u64), 2), "1.02");
        assert_eq!(format_gwei(&U256::from(1_005_000_001u64), 2), "1.01");
    }

    #[test]
    fn test_native_ties_round_to_even() {
        assert_eq!(format_native(&U256::from(1_000_000_500_000_000_000u64), 6), "1.000000");
        assert_eq!(format_native(&U256::from(1_000_001_500_000_000_000u64), 6), "1.000002");
        assert_eq!(format_native(&U256::from(2_500_000_000_000_000_000u64), 0), "2");
        assert_eq!(format_native(&U256::from(3_500_000_000_000_000_000u64), 0), "4");
    }
}
