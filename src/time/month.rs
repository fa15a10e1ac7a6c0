use std::fmt;

use chrono::Datelike;

use super::Date;

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Month {
    year: i32,
    month: u32,
}

impl From<Date> for Month {
    fn from(date: Date) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Month {
    pub fn first_day(&self) -> Option<Date> {
        Date::from_ymd_opt(self.year, self.month, 1)
    }

    /// Returns `None` only when the month lies outside of the supported calendar range.
    pub fn last_day(&self) -> Option<Date> {
        self.next().first_day()?.pred_opt()
    }

    pub fn next(mut self) -> Month {
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
        self
    }

    /// Iterates over the month-end dates starting from this month.
    pub fn month_ends(self) -> impl Iterator<Item = Date> {
        std::iter::successors(Some(self), |month| Some(month.next()))
            .map_while(|month| month.last_day())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}.{}", self.month, self.year)
    }
}
