pub mod table;

use crate::time::DEFAULT_DATE_FORMAT;
use crate::types::Date;

pub fn format_date(date: Date) -> String {
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_formatting() {
        assert_eq!(format_date(date!(1, 2, 2021)), "01.02.2021");
        assert_eq!(format_date(date!(31, 12, 2021)), "31.12.2021");
    }
}
