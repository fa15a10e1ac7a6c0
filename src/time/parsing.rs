use chrono::Datelike;

use crate::core::GenericResult;

use super::Date;

pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

pub fn parse_date(date: &str, format: &str) -> GenericResult<Date> {
    Ok(Date::parse_from_str(date, format).map_err(|_| format!(
        "Invalid date: {:?}", date))?)
}

/// Parses the date using the first matching format. The date must be written exactly in the
/// format: `%Y` alone is happy with `31.01.21` meaning year 21 and `%d` with `1.01.2021`.
pub fn parse_user_date<F, S>(date: &str, formats: F) -> GenericResult<Date>
    where
        F: IntoIterator<Item = S>,
        S: AsRef<str>,
{
    for format in formats {
        let format = format.as_ref();

        if let Ok(parsed) = parse_date(date, format) {
            if is_four_digit_year(parsed) && parsed.format(format).to_string() == date {
                return Ok(parsed);
            }
        }
    }

    Err!("Invalid date: {:?}", date)
}

pub fn is_four_digit_year(date: Date) -> bool {
    (1000..=9999).contains(&date.year())
}
