//! Card expiry date validation.
//!
//! The form only produces one shape, `MM/YY`, so parsing is strict: exactly
//! two month digits, a slash and two year digits. Anything else, including
//! the partial values seen while typing, is invalid.
//!
//! # Two-digit years
//!
//! The year is compared against `now.year() mod 100` with no century
//! anchor. A card reading `05` is treated as year 5 of the current century
//! bucket, so near a century rollover the comparison is ambiguous.
//!
//! # Example
//!
//! ```
//! use card_vault::expiry::{is_expiry_valid, parse_expiry};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//!
//! assert!(is_expiry_valid("01/25", &now));
//! assert!(!is_expiry_valid("12/24", &now));
//! assert!(!is_expiry_valid("13/25", &now));
//!
//! let expiry = parse_expiry("07/29").unwrap();
//! assert_eq!(expiry.month(), 7);
//! assert_eq!(expiry.year(), 29);
//! ```

use chrono::Datelike;
use std::fmt;

/// A parsed `MM/YY` expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    /// Two-digit year (0-99). Declared first so ordering is chronological.
    year: u8,
    /// Month (1-12)
    month: u8,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is not 1-12 or the year is not 0-99.
    pub fn new(month: u8, year: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || year > 99 {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the two-digit year.
    #[inline]
    pub const fn year(&self) -> u8 {
        self.year
    }

    /// Returns true if the card expired before the month containing `now`.
    ///
    /// A card stays valid through the whole of its expiry month.
    pub fn is_expired_at(&self, now: &impl Datelike) -> bool {
        let (current_year, current_month) = year_month_of(now);

        if self.year < current_year {
            return true;
        }
        if self.year == current_year && self.month < current_month {
            return true;
        }
        false
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

/// Errors that can occur during expiry date parsing/validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// The input is empty.
    Empty,
    /// The input is not exactly `MM/YY`.
    InvalidFormat,
    /// Month is out of range (must be 1-12).
    InvalidMonth(u8),
    /// The expiry month is before the current month.
    Expired {
        /// The expiry month.
        month: u8,
        /// The two-digit expiry year.
        year: u8,
    },
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry date is empty"),
            Self::InvalidFormat => write!(f, "invalid expiry format (expected MM/YY)"),
            Self::InvalidMonth(m) => write!(f, "invalid month {:02}: must be 01-12", m),
            Self::Expired { month, year } => {
                write!(f, "card expired ({:02}/{:02})", month, year)
            }
        }
    }
}

impl std::error::Error for ExpiryError {}

/// Parses a strict `MM/YY` string without checking it against the clock.
///
/// # Example
///
/// ```
/// use card_vault::expiry::{parse_expiry, ExpiryError};
///
/// assert!(parse_expiry("12/30").is_ok());
/// assert_eq!(parse_expiry("00/30"), Err(ExpiryError::InvalidMonth(0)));
/// assert_eq!(parse_expiry("1230"), Err(ExpiryError::InvalidFormat));
/// ```
pub fn parse_expiry(input: &str) -> Result<ExpiryDate, ExpiryError> {
    let &[m1, m2, b'/', y1, y2] = input.as_bytes() else {
        return Err(if input.is_empty() {
            ExpiryError::Empty
        } else {
            ExpiryError::InvalidFormat
        });
    };

    if ![m1, m2, y1, y2].iter().all(u8::is_ascii_digit) {
        return Err(ExpiryError::InvalidFormat);
    }

    let month = (m1 - b'0') * 10 + (m2 - b'0');
    let year = (y1 - b'0') * 10 + (y2 - b'0');

    ExpiryDate::new(month, year).ok_or(ExpiryError::InvalidMonth(month))
}

/// Parses `input` and rejects it if it expired before the month of `now`.
pub fn validate_expiry(input: &str, now: &impl Datelike) -> Result<ExpiryDate, ExpiryError> {
    let expiry = parse_expiry(input)?;

    if expiry.is_expired_at(now) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    Ok(expiry)
}

/// Returns true if `value` is a well-formed `MM/YY` date that has not
/// expired relative to `now`.
///
/// The whole current month is accepted, as is any later month or year.
#[inline]
pub fn is_expiry_valid(value: &str, now: &impl Datelike) -> bool {
    validate_expiry(value, now).is_ok()
}

/// Two-digit year and month (1-12) of `now`.
fn year_month_of(now: &impl Datelike) -> (u8, u8) {
    // rem_euclid keeps the result in 0..100 for years before 0 as well
    let year = now.year().rem_euclid(100) as u8;
    let month = now.month() as u8;
    (year, month)
}
