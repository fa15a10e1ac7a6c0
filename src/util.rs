use std::str::FromStr;

use rust_decimal::RoundingStrategy;

use crate::core::GenericResult;
use crate::types::Decimal;

pub fn parse_decimal(string: &str) -> GenericResult<Decimal> {
    Ok(Decimal::from_str(string.trim()).map_err(|_| format!(
        "Invalid decimal value: {:?}", string))?)
}

/// Converts a float through its shortest decimal representation, so `6.1` becomes exactly `6.1`
/// instead of the nearest binary fraction.
pub fn decimal_from_float(value: f64) -> GenericResult<Decimal> {
    if !value.is_finite() {
        return Err!("Invalid decimal value: {}", value);
    }
    parse_decimal(&value.to_string())
}

/// Rounds half away from zero (`0.055` -> `0.06`, `-0.055` -> `-0.06`).
pub fn round(value: Decimal, points: u32) -> Decimal {
    value.round_dp_with_strategy(points, RoundingStrategy::MidpointAwayFromZero)
}

/// Same as [`round`], but a missing value rounds to zero.
pub fn round_opt(value: Option<Decimal>, points: u32) -> Decimal {
    value.map(|value| round(value, points)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest(input, expected,
        case("0.055",  "0.06"),
        case("0.054",  "0.05"),
        case("0.045",  "0.05"),
        case("1.005",  "1.01"),
        case("1.115",  "1.12"),
        case("1.125",  "1.13"),
        case("1.1249", "1.12"),
        case("-0.055", "-0.06"),
        case("10050",  "10050"),
    )]
    fn rounding(input: &str, expected: &str) {
        let from = Decimal::from_str(input).unwrap();
        let to = Decimal::from_str(expected).unwrap();
        assert_eq!(round(from, 2), to);
    }

    #[test]
    fn rounding_keeps_currency_scale() {
        assert_eq!(round(dec!(10150.75125), 2).to_string(), "10150.75");
        assert_eq!(round(dec!(10050.000), 2).to_string(), "10050.00");
    }

    #[test]
    fn missing_value_rounding() {
        assert_eq!(round_opt(None, 2), dec!(0));
        assert_eq!(round_opt(Some(dec!(0.055)), 2), dec!(0.06));
    }

    #[rstest(input, expected,
        case(6.0,  "6"),
        case(6.1,  "6.1"),
        case(7.25, "7.25"),
        case(0.1,  "0.1"),
    )]
    fn float_conversion(input: f64, expected: &str) {
        assert_eq!(decimal_from_float(input).unwrap(), Decimal::from_str(expected).unwrap());
    }

    #[test]
    fn invalid_float_conversion() {
        assert!(decimal_from_float(f64::NAN).is_err());
        assert!(decimal_from_float(f64::INFINITY).is_err());
    }

    #[test]
    fn decimal_parsing() {
        assert_eq!(parse_decimal(" 6.5 ").unwrap(), dec!(6.5));
        assert!(parse_decimal("6,5").is_err());
        assert!(parse_decimal("").is_err());
    }
}
