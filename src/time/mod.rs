mod month;
mod parsing;

use chrono::Local;

pub use crate::types::Date;

pub use month::*;
pub use parsing::*;

pub fn today() -> Date {
    Local::now().date_naive()
}
