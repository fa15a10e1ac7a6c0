use std::str::FromStr;

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::time::{self, DEFAULT_DATE_FORMAT, Month};
use crate::types::{Date, Decimal};
use crate::util;

use super::config::Limits;
use super::failure::{Field, ValidationFailure};

/// A loosely-typed field value as it comes from a request or the command line.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    #[serde(skip_deserializing)]
    Date(Date),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> RawValue {
        RawValue::Text(value.to_owned())
    }
}

impl From<Date> for RawValue {
    fn from(date: Date) -> RawValue {
        RawValue::Date(date)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> RawValue {
        RawValue::Integer(value.into())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> RawValue {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> RawValue {
        RawValue::Float(value)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawApplicationInput {
    #[serde(alias = "dt")]
    pub date: RawValue,
    pub periods: RawValue,
    pub amount: RawValue,
    pub rate: RawValue,
}

impl RawApplicationInput {
    pub fn new<D, P, A, R>(date: D, periods: P, amount: A, rate: R) -> RawApplicationInput
        where D: Into<RawValue>, P: Into<RawValue>, A: Into<RawValue>, R: Into<RawValue>
    {
        RawApplicationInput {
            date: date.into(),
            periods: periods.into(),
            amount: amount.into(),
            rate: rate.into(),
        }
    }
}

/// A validated deposit application. Can only be obtained through [`Validator`] or
/// [`DepositApplication::new`], so all the field invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositApplication {
    application_date: Date,
    periods: u32,
    amount: u64,
    rate: Decimal,
}

impl DepositApplication {
    /// Validates already typed values against the default limits.
    pub fn new(
        application_date: Date, periods: u32, amount: u64, rate: Decimal,
    ) -> Result<DepositApplication, ValidationFailure> {
        let validator = Validator::default();

        let application_date = validator.check_date(application_date)?;
        let periods = validator.check_periods(i64::from(periods))?;
        validator.check_term(application_date, periods)?;

        Ok(DepositApplication {
            application_date,
            periods,
            amount: validator.check_amount(amount)?,
            rate: validator.check_rate(rate)?,
        })
    }

    pub fn application_date(&self) -> Date {
        self.application_date
    }

    pub fn periods(&self) -> u32 {
        self.periods
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

pub struct Validator {
    limits: Limits,
    date_formats: Vec<String>,
}

impl Default for Validator {
    fn default() -> Validator {
        Validator::new(Limits::default(), vec![DEFAULT_DATE_FORMAT.to_owned()])
    }
}

impl Validator {
    pub fn new(limits: Limits, date_formats: Vec<String>) -> Validator {
        Validator {limits, date_formats}
    }

    /// Checks the fields in date -> periods -> amount -> rate order and returns the first failure.
    pub fn validate(&self, raw: &RawApplicationInput) -> Result<DepositApplication, ValidationFailure> {
        let application_date = self.validate_date(&raw.date)?;
        let periods = self.validate_periods(&raw.periods)?;
        self.check_term(application_date, periods)?;

        let application = DepositApplication {
            application_date,
            periods,
            amount: self.validate_amount(&raw.amount)?,
            rate: self.validate_rate(&raw.rate)?,
        };

        debug!("Validated deposit application: {:?}.", application);
        Ok(application)
    }

    fn validate_date(&self, value: &RawValue) -> Result<Date, ValidationFailure> {
        let date = match value {
            RawValue::Date(date) => *date,
            RawValue::Text(text) => time::parse_user_date(text, &self.date_formats).map_err(|e| {
                reject(Field::Date, value, &e.to_string());
                ValidationFailure::parse_error(Field::Date)
            })?,
            _ => {
                reject(Field::Date, value, "not a date");
                return Err(ValidationFailure::parse_error(Field::Date));
            },
        };

        self.check_date(date)
    }

    fn check_date(&self, date: Date) -> Result<Date, ValidationFailure> {
        if !time::is_four_digit_year(date) {
            debug!("Deposit date {} has no four-digit year.", date);
            return Err(ValidationFailure::range_error(Field::Date));
        }
        Ok(date)
    }

    /// The last statement date must stay representable in the day-month-year format, so a term
    /// running past 31.12.9999 is a date range violation.
    fn check_term(&self, date: Date, periods: u32) -> Result<(), ValidationFailure> {
        let last_statement_date = Month::from(date).month_ends()
            .nth(periods.saturating_sub(1) as usize);

        if !last_statement_date.is_some_and(time::is_four_digit_year) {
            debug!("Deposit term of {} months starting at {} ends after year 9999.", periods, date);
            return Err(ValidationFailure::range_error(Field::Date));
        }
        Ok(())
    }

    fn validate_periods(&self, value: &RawValue) -> Result<u32, ValidationFailure> {
        // Non-integer periods are reported as a range violation, not as a parse error
        let periods = parse_integer(value).ok_or_else(|| {
            reject(Field::Periods, value, "not an integer");
            ValidationFailure::range_error(Field::Periods)
        })?;

        self.check_periods(periods)
    }

    fn check_periods(&self, periods: i64) -> Result<u32, ValidationFailure> {
        match u32::try_from(periods) {
            Ok(periods) if self.limits.periods.contains(periods) => Ok(periods),
            _ => {
                debug!("Deposit periods {} are out of {} range.", periods, self.limits.periods);
                Err(ValidationFailure::range_error(Field::Periods))
            },
        }
    }

    fn validate_amount(&self, value: &RawValue) -> Result<u64, ValidationFailure> {
        let amount = parse_integer(value).ok_or_else(|| {
            reject(Field::Amount, value, "not an integer");
            ValidationFailure::parse_error(Field::Amount)
        })?;

        match u64::try_from(amount) {
            Ok(amount) => self.check_amount(amount),
            Err(_) => {
                debug!("Deposit amount {} is negative.", amount);
                Err(ValidationFailure::range_error(Field::Amount))
            },
        }
    }

    fn check_amount(&self, amount: u64) -> Result<u64, ValidationFailure> {
        if !self.limits.amount.contains(amount) {
            debug!("Deposit amount {} is out of {} range.", amount, self.limits.amount);
            return Err(ValidationFailure::range_error(Field::Amount));
        }
        Ok(amount)
    }

    fn validate_rate(&self, value: &RawValue) -> Result<Decimal, ValidationFailure> {
        let rate = match value {
            RawValue::Integer(rate) => Ok(Decimal::from(*rate)),
            RawValue::Float(rate) => util::decimal_from_float(*rate),
            RawValue::Text(rate) => util::parse_decimal(rate),
            RawValue::Date(_) => Err("not a number".into()),
        }.map_err(|e| {
            reject(Field::Rate, value, &e.to_string());
            ValidationFailure::parse_error(Field::Rate)
        })?;

        self.check_rate(rate)
    }

    fn check_rate(&self, rate: Decimal) -> Result<Decimal, ValidationFailure> {
        if !self.limits.rate.contains(rate) {
            debug!("Deposit rate {} is out of {} range.", rate, self.limits.rate);
            return Err(ValidationFailure::range_error(Field::Rate));
        }
        Ok(rate)
    }
}

/// Validates the application against the default limits and date format.
pub fn validate(raw: &RawApplicationInput) -> Result<DepositApplication, ValidationFailure> {
    Validator::default().validate(raw)
}

fn parse_integer(value: &RawValue) -> Option<i64> {
    match value {
        RawValue::Integer(value) => Some(*value),
        // Saturates, which is fine for the range checks
        RawValue::Float(value) if value.is_finite() && value.fract() == 0.0 => Some(*value as i64),
        RawValue::Text(text) => {
            let text = text.trim();
            i64::from_str(text).ok().or_else(|| match util::parse_decimal(text) {
                // "7.0" is still an integer
                Ok(value) if value.fract().is_zero() => Some(
                    value.to_i64().unwrap_or_else(|| saturate(value.is_sign_negative()))),
                Ok(_) => None,
                // Too many digits even for a decimal
                Err(_) => is_integer_literal(text).then(|| saturate(text.starts_with('-'))),
            })
        },
        RawValue::Float(_) | RawValue::Date(_) => None,
    }
}

/// Integers beyond i64 are still integers: they saturate and then fail the range checks.
fn saturate(negative: bool) -> i64 {
    if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|c| c.is_ascii_digit())
}

fn reject(field: Field, value: &RawValue, reason: &str) {
    debug!("Rejecting deposit {} value {:?}: {}.", field, value, reason);
}
