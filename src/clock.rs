//! Current-time source.
//!
//! Expiry validation and export timestamps depend on "now". Passing a
//! [`Clock`] keeps those call sites deterministic under test.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// A source of the current local date and time.
pub trait Clock {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
///
/// # Example
///
/// ```
/// use card_vault::clock::{Clock, FixedClock};
/// use chrono::Datelike;
///
/// let clock = FixedClock::on(2025, 1, 15).unwrap();
/// assert_eq!(clock.today().month(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Pins the clock to midnight of the given calendar date.
    ///
    /// Returns `None` for an impossible date.
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
