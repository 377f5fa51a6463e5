//! Optional creation date stamped into generated documents.
//!
//! Generated documents carry no date unless the caller supplies one, so that
//! repeated runs on unchanged input produce identical files.

use crate::error::{PackagerError, Result};
use std::fmt;

/// A calendar date in `YYYY-MM-DD` form.
///
/// Only the shape is checked; the packager never does date arithmetic.
///
/// # Examples
///
/// ```
/// use skill_packager::created_on::CreatedOn;
///
/// let date = CreatedOn::try_from("2026-10-18").expect("valid date");
/// assert_eq!(date.as_str(), "2026-10-18");
/// assert!(CreatedOn::try_from("18/10/2026").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOn(String);

impl CreatedOn {
    /// Return the date as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CreatedOn {
    type Error = PackagerError;

    fn try_from(value: &str) -> Result<Self> {
        if is_calendar_date(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(PackagerError::InvalidCreatedOn {
                value: value.to_owned(),
            })
        }
    }
}

impl fmt::Display for CreatedOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check the `YYYY-MM-DD` shape and that the day exists in that month,
/// counting Gregorian leap years.
fn is_calendar_date(value: &str) -> bool {
    let b = value.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[8..10].iter().all(u8::is_ascii_digit);
    if !shaped {
        return false;
    }
    let two_digits = |hi: u8, lo: u8| u32::from(hi - b'0') * 10 + u32::from(lo - b'0');
    let year = two_digits(b[0], b[1]) * 100 + two_digits(b[2], b[3]);
    let month = two_digits(b[5], b[6]);
    let day = two_digits(b[8], b[9]);
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days_in_month).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::valid("2026-10-18", true)]
    #[case::leap_day("2024-02-29", true)]
    #[case::too_short("2026-10-1", false)]
    #[case::slashes("2026/10/18", false)]
    #[case::month_zero("2026-00-18", false)]
    #[case::month_thirteen("2026-13-01", false)]
    #[case::day_zero("2026-10-00", false)]
    #[case::timestamp("2026-10-18T00:00:00Z", false)]
    #[case::letters("XXXX-XX-XX", false)]
    #[case::feb_31("2026-02-31", false)]
    #[case::apr_31("2026-04-31", false)]
    #[case::non_leap("2025-02-29", false)]
    #[case::century_non_leap("1900-02-29", false)]
    #[case::century_leap("2000-02-29", true)]
    #[case::dec_31("2026-12-31", true)]
    fn validates_calendar_dates(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(CreatedOn::try_from(value).is_ok(), ok);
    }

    #[test]
    fn rejection_names_the_value() {
        let err = CreatedOn::try_from("yesterday").expect_err("invalid date");
        assert!(err.to_string().contains("yesterday"));
    }
}
