//! Exact wei/gwei/ether formatting over U256
//!
//! All arithmetic is integer arithmetic; no value ever passes through a
//! float. Fractional parts are expanded exactly and trailing zeros trimmed.

use alloy_primitives::U256;

const GWEI_DECIMALS: u32 = 9;
const ETHER_DECIMALS: u32 = 18;

/// Render a raw wei amount with thousands separators.
pub fn format_wei(wei: U256) -> String {
    group_thousands(&wei.to_string())
}

/// Render a wei amount as gwei with an exact fractional part.
pub fn format_gwei(wei: U256) -> String {
    format_units(wei, GWEI_DECIMALS)
}

/// Render a wei amount as ether with an exact fractional part.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Render a wei amount as ether rounded half-up to `places` fractional
/// digits. `places` is clamped to the 18 available digits; a carry out of
/// the fraction propagates into the integer part.
pub fn format_ether_rounded(wei: U256, places: u32) -> String {
    format_units_rounded(wei, ETHER_DECIMALS, places)
}

/// Exact fixed-point rendering of `amount` scaled down by `decimals` digits.
pub fn format_units(amount: U256, decimals: u32) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let integer = amount / scale;
    let remainder = amount % scale;
    if remainder.is_zero() {
        return group_thousands(&integer.to_string());
    }
    let fraction = zero_pad(&remainder.to_string(), decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    format!("{}.{}", group_thousands(&integer.to_string()), fraction)
}

/// Like `format_units` but rounded half-up to `places` fractional digits.
pub fn format_units_rounded(amount: U256, decimals: u32, places: u32) -> String {
    let places = places.min(decimals);
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let mut integer = amount / scale;
    let remainder = amount % scale;

    let keep_scale = U256::from(10u64).pow(U256::from(decimals - places));
    let mut kept = remainder / keep_scale;
    let dropped = remainder % keep_scale;

    // round half up on the first dropped digit
    if dropped * U256::from(2u64) >= keep_scale && !dropped.is_zero() {
        kept += U256::from(1u64);
        let kept_limit = U256::from(10u64).pow(U256::from(places));
        if kept == kept_limit {
            kept = U256::ZERO;
            integer += U256::from(1u64);
        }
    }

    if places == 0 || kept.is_zero() {
        return group_thousands(&integer.to_string());
    }
    let fraction = zero_pad(&kept.to_string(), places as usize);
    let fraction = fraction.trim_end_matches('0');
    format!("{}.{}", group_thousands(&integer.to_string()), fraction)
}

fn zero_pad(digits: &str, width: usize) -> String {
    if digits.len() >= width {
        digits.to_string()
    } else {
        format!("{}{}", "0".repeat(width - digits.len()), digits)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(v: u128) -> U256 {
        U256::from(v)
    }

    #[test]
    fn test_format_wei_grouping() {
        assert_eq!(format_wei(wei(0)), "0");
        assert_eq!(format_wei(wei(999)), "999");
        assert_eq!(format_wei(wei(1_000)), "1,000");
        assert_eq!(format_wei(wei(1_234_567)), "1,234,567");
    }

    #[test]
    fn test_format_gwei() {
        assert_eq!(format_gwei(wei(1_000_000_000)), "1");
        assert_eq!(format_gwei(wei(1_500_000_000)), "1.5");
        assert_eq!(format_gwei(wei(1)), "0.000000001");
        assert_eq!(format_gwei(wei(21_000_000_000_000)), "21,000");
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(wei(1_000_000_000_000_000_000)), "1");
        assert_eq!(format_ether(wei(1_500_000_000_000_000_000)), "1.5");
        assert_eq!(format_ether(wei(100_000_000_000_000_000)), "0.1");
        assert_eq!(format_ether(wei(1)), "0.000000000000000001");
    }

    #[test]
    fn test_format_ether_large() {
        // beyond u128: 10^21 ether in wei is 10^39
        let huge = U256::from(10u64).pow(U256::from(39u64));
        assert_eq!(format_ether(huge), "1,000,000,000,000,000,000,000");
    }

    #[test]
    fn test_rounding_half_up() {
        // 1.25 ether to 1 place -> 1.3
        assert_eq!(
            format_ether_rounded(wei(1_250_000_000_000_000_000), 1),
            "1.3"
        );
        // 1.24 ether to 1 place -> 1.2
        assert_eq!(
            format_ether_rounded(wei(1_240_000_000_000_000_000), 1),
            "1.2"
        );
        // exactly half of a dropped unit rounds up
        assert_eq!(
            format_ether_rounded(wei(1_050_000_000_000_000_000), 1),
            "1.1"
        );
    }

    #[test]
    fn test_rounding_carries_into_integer() {
        // 1.96 ether to 1 place -> 2
        assert_eq!(
            format_ether_rounded(wei(1_960_000_000_000_000_000), 1),
            "2"
        );
        // 999.9995 to 3 places -> 1,000
        assert_eq!(
            format_ether_rounded(wei(999_999_500_000_000_000_000), 3),
            "1,000"
        );
    }

    #[test]
    fn test_rounding_to_zero_places() {
        assert_eq!(format_ether_rounded(wei(1_499_000_000_000_000_000), 0), "1");
        assert_eq!(format_ether_rounded(wei(1_500_000_000_000_000_000), 0), "2");
    }

    #[test]
    fn test_rounding_trims_trailing_zeros() {
        // 1.204 to 2 places -> 1.2, not 1.20
        assert_eq!(
            format_ether_rounded(wei(1_204_000_000_000_000_000), 2),
            "1.2"
        );
    }

    #[test]
    fn test_places_clamped_to_decimals() {
        assert_eq!(format_ether_rounded(wei(1_500_000_000_000_000_000), 40), "1.5");
    }
}
