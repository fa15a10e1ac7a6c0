use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, Error};

use crate::core::EmptyResult;
use crate::types::Decimal;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + fmt::Display> Bounds<T> {
    pub fn new(min: T, max: T) -> Bounds<T> {
        Bounds {min, max}
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    fn validate(&self, name: &str, zero: T) -> EmptyResult {
        if self.min <= zero {
            return Err!("Invalid {} limits: the minimum must be positive", name);
        }
        if self.min > self.max {
            return Err!("Invalid {} limits: {} > {}", name, self.min, self.max);
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}; {}]", self.min, self.max)
    }
}

/// Permitted intervals for the application fields. All of them are closed.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    #[serde(default = "default_periods")]
    pub periods: Bounds<u32>,
    #[serde(default = "default_amount")]
    pub amount: Bounds<u64>,
    #[serde(default = "default_rate")]
    pub rate: Bounds<Decimal>,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            periods: default_periods(),
            amount: default_amount(),
            rate: default_rate(),
        }
    }
}

impl Limits {
    pub fn validate_inner(&self) -> EmptyResult {
        self.periods.validate("periods", 0)?;
        self.amount.validate("amount", 0)?;
        self.rate.validate("rate", Decimal::ZERO)?;
        Ok(())
    }
}

fn default_periods() -> Bounds<u32> {
    Bounds::new(1, 60)
}

fn default_amount() -> Bounds<u64> {
    Bounds::new(10_000, 3_000_000)
}

fn default_rate() -> Bounds<Decimal> {
    Bounds::new(dec!(1), dec!(8))
}

/// Which balance feeds the next compounding step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BalanceCarry {
    /// The unrounded balance is carried over, only the reported balances are rounded.
    #[default]
    Exact,
    /// Each month is compounded from the previous month's rounded balance.
    Rounded,
}

impl<'de> Deserialize<'de> for BalanceCarry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let value = String::deserialize(deserializer)?;

        Ok(match value.as_str() {
            "exact" => BalanceCarry::Exact,
            "rounded" => BalanceCarry::Rounded,
            _ => return Err(D::Error::unknown_variant(&value, &["exact", "rounded"])),
        })
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use matches::assert_matches;
    use super::*;

    #[test]
    fn default_limits() {
        let limits = Limits::default();
        limits.validate_inner().unwrap();

        assert!(limits.periods.contains(1));
        assert!(limits.periods.contains(60));
        assert!(!limits.periods.contains(0));
        assert!(!limits.periods.contains(61));

        assert!(limits.amount.contains(10_000));
        assert!(limits.amount.contains(3_000_000));
        assert!(!limits.amount.contains(9_999));
        assert!(!limits.amount.contains(3_000_001));

        assert!(limits.rate.contains(dec!(1)));
        assert!(limits.rate.contains(dec!(8.00)));
        assert!(!limits.rate.contains(dec!(0.99)));
        assert!(!limits.rate.contains(dec!(8.01)));
    }

    #[test]
    fn partial_limits() {
        let limits: Limits = serde_yaml::from_str(indoc!("
            periods: {min: 3, max: 12}
            rate: {min: 0.5, max: 12.5}
        ")).unwrap();

        assert_eq!(limits.periods, Bounds::new(3, 12));
        assert_eq!(limits.amount, default_amount());
        assert_eq!(limits.rate, Bounds::new(dec!(0.5), dec!(12.5)));
    }

    #[test]
    fn invalid_limits() {
        let limits = Limits {
            periods: Bounds::new(12, 3),
            ..Default::default()
        };
        assert_matches!(limits.validate_inner(), Err(e) if e.to_string() == "Invalid periods limits: 12 > 3");

        let limits = Limits {
            amount: Bounds::new(0, 100),
            ..Default::default()
        };
        assert_matches!(limits.validate_inner(), Err(e) if e.to_string() == "Invalid amount limits: the minimum must be positive");
    }

    #[test]
    fn balance_carry_parsing() {
        assert_eq!(serde_yaml::from_str::<BalanceCarry>("exact").unwrap(), BalanceCarry::Exact);
        assert_eq!(serde_yaml::from_str::<BalanceCarry>("rounded").unwrap(), BalanceCarry::Rounded);
        assert!(serde_yaml::from_str::<BalanceCarry>("monthly").is_err());
    }
}
