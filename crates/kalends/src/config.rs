//! Calendar configuration and the clock anchor.
//!
//! The original design kept the month-overflow policy, the week boundaries,
//! and the test-clock override as process-wide mutable state. Here they are
//! explicit values handed to the operations that consult them, so tests can
//! run in parallel without cross-contamination and "now" never comes from a
//! hidden global.

use chrono::{DateTime, Utc, Weekday};

use crate::instant::CivilInstant;
use chrono_tz::Tz;

/// Week-boundary and month-arithmetic settings.
///
/// Consulted by month addition (overflow vs. clamp), weekday stepping,
/// start/end-of-week snapping, and the weekday/weekend predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Whether generic month addition wraps day-of-month into the next
    /// month (`true`, Jan 31 + 1 month = Mar 3) or clamps to the last day
    /// of the target month (`false`, Jan 31 + 1 month = Feb 28).
    pub months_overflow: bool,
    /// First day of the week for `start_of_week`.
    pub week_starts_at: Weekday,
    /// Last day of the week for `end_of_week`.
    pub week_ends_at: Weekday,
    /// Days counted as weekend by the weekday/weekend predicates.
    pub weekend_days: Vec<Weekday>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            months_overflow: true,
            week_starts_at: Weekday::Mon,
            week_ends_at: Weekday::Sun,
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl CalendarConfig {
    /// Whether `weekday` falls in the configured weekend set.
    pub fn is_weekend_day(&self, weekday: Weekday) -> bool {
        self.weekend_days.contains(&weekday)
    }
}

/// Source of the current instant.
///
/// `Fixed` substitutes a frozen "now" for every now-relative constructor,
/// which is the testing aid the original exposed as a settable global.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Freeze the clock at the given instant.
    pub fn fixed(at: &CivilInstant) -> Self {
        Clock::Fixed(at.to_utc())
    }

    /// The current instant in UTC.
    pub fn now_utc(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// The current instant as a civil value in `tz`.
    pub fn now(&self, tz: Tz) -> CivilInstant {
        CivilInstant::from_utc(self.now_utc(), tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_week_runs_monday_to_sunday() {
        let config = CalendarConfig::default();
        assert_eq!(config.week_starts_at, Weekday::Mon);
        assert_eq!(config.week_ends_at, Weekday::Sun);
        assert!(config.is_weekend_day(Weekday::Sat));
        assert!(config.is_weekend_day(Weekday::Sun));
        assert!(!config.is_weekend_day(Weekday::Wed));
    }

    #[test]
    fn fixed_clock_returns_the_frozen_instant() {
        let at = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
        let clock = Clock::Fixed(at);
        assert_eq!(clock.now_utc(), at);
        let now = clock.now(chrono_tz::UTC);
        assert_eq!(now.year(), 2012);
        assert_eq!(now.month(), 1);
        assert_eq!(now.day(), 1);
    }
}
