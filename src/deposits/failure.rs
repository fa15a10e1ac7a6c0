use std::error::Error;
use std::fmt;

use strum::{Display, EnumIter};

/// Application fields in validation order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Date,
    Periods,
    Amount,
    Rate,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FailureKind {
    /// The value can't be interpreted as the field's type or format.
    ParseError,
    /// The value has the right type, but lies outside of the permitted interval.
    RangeError,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ValidationFailure {
    pub field: Field,
    pub kind: FailureKind,
}

impl ValidationFailure {
    pub fn parse_error(field: Field) -> ValidationFailure {
        ValidationFailure {field, kind: FailureKind::ParseError}
    }

    pub fn range_error(field: Field) -> ValidationFailure {
        ValidationFailure {field, kind: FailureKind::RangeError}
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match (self.field, self.kind) {
            (Field::Date, FailureKind::ParseError) => "invalid date format",
            (Field::Date, FailureKind::RangeError) => "unsupported date",
            (_, FailureKind::ParseError) => "invalid value",
            (_, FailureKind::RangeError) => "the value is out of the permitted range",
        };
        write!(f, "Invalid deposit {}: {}", self.field, description)
    }
}

impl Error for ValidationFailure {
}
