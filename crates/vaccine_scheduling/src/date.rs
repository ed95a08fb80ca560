use chrono::NaiveDate;

use crate::scheduling_types::SchedulingError;

// Year, then one- or two-digit month and day
lazy_static::lazy_static! {
    static ref DATE_REGEX: regex::Regex =
        regex::Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap();
}

/// Parses a `yyyy-mm-dd` date, also accepting single-digit month and day.
pub fn parse_date(input: &str) -> Result<NaiveDate, SchedulingError> {
    if !DATE_REGEX.is_match(input) {
        return Err(SchedulingError::InvalidDate(input.to_string()));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| SchedulingError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_padded_and_unpadded() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(parse_date("2024-06-01").unwrap(), expected);
        assert_eq!(parse_date("2024-6-1").unwrap(), expected);
    }

    #[test]
    fn test_rejects_bad_input() {
        for input in ["", "06-01-2024", "2024/06/01", "2024-06-01x", "2024-13-01", "2023-02-29"] {
            assert!(
                matches!(parse_date(input), Err(SchedulingError::InvalidDate(_))),
                "{input} should be rejected"
            );
        }
    }
}
