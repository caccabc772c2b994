//! Age gate.
//!
//! Visitors must confirm a birth date at least 21 years back before the site
//! content is shown. The gate has two states, `Unverified` and `Verified`;
//! once verified it stays verified for the rest of the session.
//!
//! # Date Rules
//!
//! - Each field is read as a leading integer: leading whitespace and an
//!   optional sign are accepted, anything after the digits is ignored
//!   (`"12th"` reads as 12).
//! - month in 1..=12, day in 1..=31, year >= 1900, otherwise the date is invalid.
//! - Day values past the end of the month roll over into the next month
//!   (February 31 becomes March 3, or March 2 in a leap year) rather than
//!   being rejected.
//! - Age is the difference in years, minus one if this year's birthday has
//!   not happened yet.

use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

/// Minimum age to enter the site.
pub const MINIMUM_AGE: i32 = 21;

/// Earliest accepted birth year.
pub const MINIMUM_BIRTH_YEAR: i64 = 1900;

/// Why a submission did not verify the visitor.
///
/// The display text is the message shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AgeGateError {
    /// A field is not a number or is out of range.
    #[error("Please enter a valid date.")]
    InvalidDate,
    /// The visitor is younger than [`MINIMUM_AGE`].
    #[error("Sorry, you must be 21 or older to enter.")]
    Underage,
}

impl AgeGateError {
    /// The message shown in the form's error slot.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidDate => "Please enter a valid date.",
            Self::Underage => "Sorry, you must be 21 or older to enter.",
        }
    }
}

/// The three raw date fields from the age form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BirthDateInput {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub year: String,
}

impl BirthDateInput {
    /// Build an input from field values.
    #[must_use]
    pub fn new(month: impl Into<String>, day: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            day: day.into(),
            year: year.into(),
        }
    }
}

/// Gate state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgeGateState {
    #[default]
    Unverified,
    Verified,
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The gate moved from `Unverified` to `Verified`.
    Verified { age: i32 },
    /// The gate was already verified; nothing changed.
    AlreadyVerified,
}

/// The age gate state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeGate {
    state: AgeGateState,
}

impl AgeGate {
    /// Restore the gate from the session flag.
    #[must_use]
    pub const fn from_session_flag(verified: bool) -> Self {
        let state = if verified {
            AgeGateState::Verified
        } else {
            AgeGateState::Unverified
        };
        Self { state }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AgeGateState {
        self.state
    }

    /// Whether the gate has been passed.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self.state, AgeGateState::Verified)
    }

    /// Handle a form submission.
    ///
    /// # Errors
    ///
    /// Returns `AgeGateError` if the date is invalid or the visitor is under
    /// age; the state is unchanged and the form can be submitted again.
    pub fn submit(
        &mut self,
        input: &BirthDateInput,
        today: NaiveDate,
    ) -> Result<Verification, AgeGateError> {
        if self.is_verified() {
            return Ok(Verification::AlreadyVerified);
        }

        let age = verify_birth_date(input, today)?;
        self.state = AgeGateState::Verified;
        Ok(Verification::Verified { age })
    }
}

/// Validate the form fields and return the visitor's age if old enough.
///
/// # Errors
///
/// Returns `AgeGateError::InvalidDate` or `AgeGateError::Underage`.
pub fn verify_birth_date(input: &BirthDateInput, today: NaiveDate) -> Result<i32, AgeGateError> {
    let month = parse_leading_int(&input.month).ok_or(AgeGateError::InvalidDate)?;
    let day = parse_leading_int(&input.day).ok_or(AgeGateError::InvalidDate)?;
    let year = parse_leading_int(&input.year).ok_or(AgeGateError::InvalidDate)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year < MINIMUM_BIRTH_YEAR {
        return Err(AgeGateError::InvalidDate);
    }

    // Years beyond the calendar's range cannot be old enough.
    let birth = rolled_birth_date(year, month, day).ok_or(AgeGateError::Underage)?;
    let age = age_on(birth, today);
    if age >= MINIMUM_AGE {
        Ok(age)
    } else {
        Err(AgeGateError::Underage)
    }
}

/// Read a leading integer the way browser form scripts do.
///
/// Skips leading whitespace, accepts one optional `+` or `-`, then reads
/// decimal digits up to the first non-digit. Returns `None` when no digit
/// follows, or when the value does not fit in an `i64`.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, text.get(1..)?),
        Some(b'+') => (false, text.get(1..)?),
        _ => (false, text),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let digits = rest.get(..digits_len)?;
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Build the birth date, rolling day overflow into the following month(s).
fn rolled_birth_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month).ok()?;
    let extra_days = u64::try_from(day - 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(extra_days))
}

/// Completed years between `birth` and `today`.
#[must_use]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    let birthday_pending = today.month() < birth.month()
        || (today.month() == birth.month() && today.day() < birth.day());
    if birthday_pending {
        age -= 1;
    }
    age
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn input(month: &str, day: &str, year: &str) -> BirthDateInput {
        BirthDateInput::new(month, day, year)
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("12th"), Some(12));
        assert_eq!(parse_leading_int("1.5"), Some(1));
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }

    #[test]
    fn test_malformed_dates_are_invalid() {
        let cases = [
            input("", "1", "1990"),
            input("ab", "1", "1990"),
            input("1", "x", "1990"),
            input("1", "1", "year"),
            input("0", "1", "1990"),
            input("13", "1", "1990"),
            input("1", "0", "1990"),
            input("1", "32", "1990"),
            input("1", "1", "1899"),
            input("-1", "1", "1990"),
        ];

        for case in cases {
            let mut gate = AgeGate::default();
            assert_eq!(
                gate.submit(&case, today()),
                Err(AgeGateError::InvalidDate),
                "{case:?}"
            );
            assert_eq!(gate.state(), AgeGateState::Unverified);
        }
    }

    #[test]
    fn test_exactly_twenty_is_underage() {
        let mut gate = AgeGate::default();
        let result = gate.submit(&input("10", "19", "2006"), today());
        assert_eq!(result, Err(AgeGateError::Underage));
        assert!(!gate.is_verified());
    }

    #[test]
    fn test_exactly_twenty_one_is_verified() {
        let mut gate = AgeGate::default();
        let result = gate.submit(&input("10", "19", "2005"), today());
        assert_eq!(result, Ok(Verification::Verified { age: 21 }));
        assert!(gate.is_verified());
    }

    #[test]
    fn test_birthday_tomorrow_is_still_twenty() {
        let mut gate = AgeGate::default();
        let result = gate.submit(&input("10", "20", "2005"), today());
        assert_eq!(result, Err(AgeGateError::Underage));
    }

    #[test]
    fn test_birthday_earlier_month() {
        assert_eq!(
            verify_birth_date(&input("9", "30", "2005"), today()),
            Ok(21)
        );
        assert_eq!(
            verify_birth_date(&input("11", "1", "2005"), today()),
            Err(AgeGateError::Underage)
        );
    }

    #[test]
    fn test_future_year_is_underage() {
        assert_eq!(
            verify_birth_date(&input("1", "1", "2090"), today()),
            Err(AgeGateError::Underage)
        );
        assert_eq!(
            verify_birth_date(&input("1", "1", "999999999"), today()),
            Err(AgeGateError::Underage)
        );
    }

    #[test]
    fn test_day_overflow_rolls_into_next_month() {
        // February 31, 2005 is treated as March 3, 2005.
        let march_second = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let march_third = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        assert_eq!(
            verify_birth_date(&input("2", "31", "2005"), march_second),
            Err(AgeGateError::Underage)
        );
        assert_eq!(
            verify_birth_date(&input("2", "31", "2005"), march_third),
            Ok(21)
        );

        // In a leap year it lands on March 2.
        assert_eq!(
            rolled_birth_date(2004, 2, 31),
            NaiveDate::from_ymd_opt(2004, 3, 2)
        );
    }

    #[test]
    fn test_failed_submission_can_be_retried() {
        let mut gate = AgeGate::default();
        assert!(gate.submit(&input("10", "19", "2010"), today()).is_err());
        assert!(gate.submit(&input("1", "1", "1980"), today()).is_ok());
        assert!(gate.is_verified());
    }

    #[test]
    fn test_verified_is_terminal() {
        let mut gate = AgeGate::from_session_flag(true);
        let result = gate.submit(&input("10", "19", "2010"), today());
        assert_eq!(result, Ok(Verification::AlreadyVerified));
        assert!(gate.is_verified());
    }

    #[test]
    fn test_messages() {
        assert_eq!(AgeGateError::InvalidDate.message(), "Please enter a valid date.");
        assert_eq!(
            AgeGateError::Underage.to_string(),
            "Sorry, you must be 21 or older to enter."
        );
    }
}
