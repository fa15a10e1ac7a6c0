use log::{debug, trace};
use serde::Serialize;
use serde::ser::{Serializer, SerializeMap};

use crate::formatting;
use crate::time::Month;
use crate::types::{Date, Decimal};
use crate::util;

use super::application::DepositApplication;
use super::config::BalanceCarry;

pub const BALANCE_PRECISION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub statement_date: Date,
    pub balance: Decimal,
}

/// Month-end balances in statement date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }

    pub fn final_balance(&self) -> Option<Decimal> {
        self.entries.last().map(|entry| entry.balance)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializes as `{"31.01.2021": 10050.0, ...}` preserving the statement order.
impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Balance(#[serde(with = "rust_decimal::serde::float")] Decimal);

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&formatting::format_date(entry.statement_date), &Balance(entry.balance))?;
        }
        map.end()
    }
}

pub fn compute_schedule(application: &DepositApplication) -> Schedule {
    compute_schedule_with(application, BalanceCarry::default())
}

/// Compounds the deposit monthly. Each step depends on the previous one, so the balances are
/// calculated strictly sequentially and every reported balance is rounded half-up to cents.
pub fn compute_schedule_with(application: &DepositApplication, carry: BalanceCarry) -> Schedule {
    let periods = application.periods() as usize;
    let multiplier = dec!(1) + application.rate() / dec!(12) / dec!(100);

    debug!(
        "Calculating {}-month schedule for {} at {}% from {} ({:?} balance carry)...",
        periods, application.amount(), application.rate(),
        formatting::format_date(application.application_date()), carry);

    let mut balance = Decimal::from(application.amount());
    let mut entries = Vec::with_capacity(periods);

    for statement_date in Month::from(application.application_date()).month_ends().take(periods) {
        let accrued = balance * multiplier;
        let rounded = util::round(accrued, BALANCE_PRECISION);

        trace!("{}: {} -> {} ({}).", formatting::format_date(statement_date), balance, rounded, accrued);

        balance = match carry {
            BalanceCarry::Exact => accrued,
            BalanceCarry::Rounded => rounded,
        };

        entries.push(ScheduleEntry {
            statement_date,
            balance: rounded,
        });
    }

    Schedule {entries}
}
