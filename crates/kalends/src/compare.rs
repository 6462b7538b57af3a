//! Instant comparison and calendar predicates.
//!
//! Ordering is by the instant on the timeline, never by wall-clock
//! fields, so 09:00 New York equals 14:00 London. The named wrappers
//! exist for call sites that read better as words than as operators.

use crate::config::{CalendarConfig, Clock};
use crate::instant::CivilInstant;

impl CivilInstant {
    pub fn eq_instant(&self, other: &Self) -> bool {
        self == other
    }

    pub fn ne_instant(&self, other: &Self) -> bool {
        self != other
    }

    pub fn gt(&self, other: &Self) -> bool {
        self > other
    }

    pub fn gte(&self, other: &Self) -> bool {
        self >= other
    }

    pub fn lt(&self, other: &Self) -> bool {
        self < other
    }

    pub fn lte(&self, other: &Self) -> bool {
        self <= other
    }

    /// Whether this instant lies between `a` and `b`, in either order.
    /// `equal` controls whether the boundaries themselves count.
    pub fn between(&self, a: &Self, b: &Self, equal: bool) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if equal {
            lo <= self && self <= hi
        } else {
            lo < self && self < hi
        }
    }

    /// The earlier of the two instants.
    pub fn min_instant(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// The later of the two instants.
    pub fn max_instant(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    /// Whichever of `a` and `b` is nearer in elapsed seconds. Ties go to
    /// `a`.
    pub fn closest(&self, a: Self, b: Self) -> Self {
        if self.diff_in_seconds(&a, true) <= self.diff_in_seconds(&b, true) {
            a
        } else {
            b
        }
    }

    /// Whichever of `a` and `b` is farther in elapsed seconds. Ties go to
    /// `b`.
    pub fn farthest(&self, a: Self, b: Self) -> Self {
        if self.diff_in_seconds(&a, true) > self.diff_in_seconds(&b, true) {
            a
        } else {
            b
        }
    }

    pub fn is_weekday(&self, config: &CalendarConfig) -> bool {
        !self.is_weekend(config)
    }

    pub fn is_weekend(&self, config: &CalendarConfig) -> bool {
        config.is_weekend_day(self.weekday())
    }

    /// Same local calendar date, each side read in its own timezone.
    pub fn is_same_day(&self, other: &Self) -> bool {
        self.naive().date() == other.naive().date()
    }

    pub fn is_future(&self, clock: &Clock) -> bool {
        *self > clock.now(self.timezone())
    }

    pub fn is_past(&self, clock: &Clock) -> bool {
        *self < clock.now(self.timezone())
    }

    pub fn is_today(&self, clock: &Clock) -> bool {
        self.is_same_day(&clock.now(self.timezone()))
    }

    pub fn is_tomorrow(&self, clock: &Clock) -> bool {
        self.is_same_day(&clock.now(self.timezone()).add_days(1))
    }

    pub fn is_yesterday(&self, clock: &Clock) -> bool {
        self.is_same_day(&clock.now(self.timezone()).sub_days(1))
    }

    /// Same month and day of month, the year is ignored.
    pub fn is_birthday(&self, other: &Self) -> bool {
        self.month() == other.month() && self.day() == other.day()
    }
}
