pub mod application;
pub mod config;
pub mod failure;
pub mod request;
pub mod schedule;

use crate::formatting::table::{Cell, Row, Table, print_table, render_table};
use crate::time::Month;
use crate::types::Decimal;

pub use self::application::{DepositApplication, RawApplicationInput, RawValue, Validator, validate};
pub use self::config::{BalanceCarry, Bounds, Limits};
pub use self::failure::{FailureKind, Field, ValidationFailure};
pub use self::schedule::{Schedule, ScheduleEntry, compute_schedule, compute_schedule_with};

const TITLES: [&str; 4] = ["Month", "Statement date", "Interest", "Balance"];

pub fn print_schedule(application: &DepositApplication, schedule: &Schedule) {
    print_table(&title(application), &TITLES, build_table(application, schedule));
}

pub fn render_schedule(application: &DepositApplication, schedule: &Schedule) -> String {
    render_table(&title(application), &TITLES, build_table(application, schedule))
}

fn title(application: &DepositApplication) -> String {
    format!("{} at {}% for {} months", application.amount(), application.rate().normalize(), application.periods())
}

fn build_table(application: &DepositApplication, schedule: &Schedule) -> Table {
    let mut table = Table::new();
    let mut previous_balance = Decimal::from(application.amount());

    for entry in schedule {
        table.add_row(Row::new(&[
            Cell::new(&Month::from(entry.statement_date).to_string()),
            Cell::new_date(entry.statement_date),
            Cell::new_amount(entry.balance - previous_balance),
            Cell::new_amount(entry.balance),
        ]));
        previous_balance = entry.balance;
    }

    table
}
