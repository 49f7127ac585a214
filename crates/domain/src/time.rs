//! Calendar date helpers.

use chrono::{NaiveDate, Utc};

/// Date format used for `add_date` / `paid_date` on the wire and in the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return the current UTC calendar date.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_date() {
        let before = Utc::now().date_naive();
        let date = today();
        let after = Utc::now().date_naive();
        assert!(date >= before);
        assert!(date <= after);
    }

    #[test]
    fn should_format_as_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date.format(DATE_FORMAT).to_string(), "2024-03-07");
    }
}
