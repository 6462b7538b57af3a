//! Structured and scalar differences between instants.
//!
//! [`CivilDiff`] decomposes the span between two instants into calendar
//! components the way a person reads it: whole years, whole months past
//! that, then a day/time remainder measured in absolute elapsed time from
//! the month anchor. `total_days` is the full span in days, independent of
//! the year/month decomposition.

use chrono::Datelike;
use serde::Serialize;

use crate::config::CalendarConfig;
use crate::instant::CivilInstant;

/// Calendar decomposition of the span between two instants. All component
/// fields are non-negative; `inverted` records direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CivilDiff {
    pub years: u32,
    /// Whole months past the years.
    pub months: u32,
    /// Days left over after the year/month decomposition, not the full
    /// span. See `total_days` for that.
    pub days: u32,
    /// The full span in whole days.
    pub total_days: i64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// True when the first instant is chronologically after the second.
    pub inverted: bool,
}

/// Stepping unit for [`CivilInstant::diff_filtered`]. Month and year steps
/// roll overflowing days forward, so stepping from January 31st visits
/// March 2nd or 3rd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl StepUnit {
    fn advance(&self, from: &CivilInstant) -> CivilInstant {
        match self {
            StepUnit::Year => from.add_years(1),
            StepUnit::Month => from.add_months_with_overflow(1),
            StepUnit::Week => from.add_weeks(1),
            StepUnit::Day => from.add_days(1),
            StepUnit::Hour => from.add_hours(1),
            StepUnit::Minute => from.add_minutes(1),
            StepUnit::Second => from.add_seconds(1),
        }
    }
}

fn signed(value: i64, negate: bool, abs: bool) -> i64 {
    if negate && !abs {
        value.saturating_neg()
    } else {
        value
    }
}

impl CivilInstant {
    /// Calendar decomposition of the span between this instant and
    /// `other`, each read in its own timezone.
    pub fn diff(&self, other: &Self) -> CivilDiff {
        let inverted = self > other;
        let (earlier, later) = if inverted { (other, self) } else { (self, other) };
        let e = earlier.naive();
        let l = later.naive();

        // Whole months between the civil fields, borrowing one when the
        // later (day, time) pair has not yet caught up within the month.
        let mut months_total = (i64::from(l.year()) * 12 + i64::from(l.month0()))
            - (i64::from(e.year()) * 12 + i64::from(e.month0()));
        if (l.day(), l.time()) < (e.day(), e.time()) {
            months_total -= 1;
        }
        // Timezone skew can leave the civil fields behind the instant
        // order at sub-month spans.
        let mut months_total = months_total.max(0);
        let mut anchor = earlier.add_months_no_overflow(months_total);
        while months_total > 0 && anchor.to_utc() > later.to_utc() {
            months_total -= 1;
            anchor = earlier.add_months_no_overflow(months_total);
        }

        let remainder = (later.to_utc() - anchor.to_utc()).num_seconds().max(0);
        let elapsed = (later.to_utc() - earlier.to_utc()).num_seconds().max(0);

        CivilDiff {
            years: (months_total / 12) as u32,
            months: (months_total % 12) as u32,
            days: (remainder / 86_400) as u32,
            total_days: elapsed / 86_400,
            hours: (remainder % 86_400 / 3_600) as u32,
            minutes: (remainder % 3_600 / 60) as u32,
            seconds: (remainder % 60) as u32,
            inverted,
        }
    }

    /// Whole calendar years between this instant and `other`. With
    /// `abs = false` the result is negative when this instant is
    /// chronologically before `other`.
    pub fn diff_in_years(&self, other: &Self, abs: bool) -> i64 {
        let d = self.diff(other);
        signed(i64::from(d.years), !d.inverted && self != other, abs)
    }

    /// Whole calendar months between this instant and `other`.
    pub fn diff_in_months(&self, other: &Self, abs: bool) -> i64 {
        let d = self.diff(other);
        signed(
            i64::from(d.years) * 12 + i64::from(d.months),
            !d.inverted && self != other,
            abs,
        )
    }

    /// Whole weeks between this instant and `other`.
    pub fn diff_in_weeks(&self, other: &Self, abs: bool) -> i64 {
        self.diff_in_days(other, abs) / 7
    }

    /// Whole days between this instant and `other`.
    pub fn diff_in_days(&self, other: &Self, abs: bool) -> i64 {
        let d = self.diff(other);
        signed(d.total_days, !d.inverted && self != other, abs)
    }

    /// Whole hours between this instant and `other`.
    pub fn diff_in_hours(&self, other: &Self, abs: bool) -> i64 {
        self.diff_in_seconds(other, abs) / 3_600
    }

    /// Whole minutes between this instant and `other`.
    pub fn diff_in_minutes(&self, other: &Self, abs: bool) -> i64 {
        self.diff_in_seconds(other, abs) / 60
    }

    /// Elapsed seconds between this instant and `other`.
    pub fn diff_in_seconds(&self, other: &Self, abs: bool) -> i64 {
        let d = self.diff(other);
        let total = d.total_days * 86_400
            + i64::from(d.hours) * 3_600
            + i64::from(d.minutes) * 60
            + i64::from(d.seconds);
        signed(total, !d.inverted && self != other, abs)
    }

    /// Count the instants between this instant and `other` (start
    /// inclusive, end exclusive) for which `predicate` holds, stepping by
    /// `unit`. With `abs = false` the count is negated when this instant
    /// is chronologically after `other`.
    pub fn diff_filtered<F>(&self, unit: StepUnit, predicate: F, other: &Self, abs: bool) -> i64
    where
        F: Fn(&CivilInstant) -> bool,
    {
        let inverted = self > other;
        let (start, end) = if inverted { (other, self) } else { (self, other) };
        let mut count = 0i64;
        let mut current = *start;
        while current < *end {
            if predicate(&current) {
                count += 1;
            }
            current = unit.advance(&current);
        }
        signed(count, inverted, abs)
    }

    /// Count of non-weekend days between this instant and `other`,
    /// stepping one day at a time from the given time of day.
    pub fn diff_in_weekdays(&self, other: &Self, config: &CalendarConfig, abs: bool) -> i64 {
        self.diff_filtered(
            StepUnit::Day,
            |dt| !config.is_weekend_day(dt.weekday()),
            other,
            abs,
        )
    }

    /// Count of weekend days between this instant and `other`.
    pub fn diff_in_weekend_days(&self, other: &Self, config: &CalendarConfig, abs: bool) -> i64 {
        self.diff_filtered(
            StepUnit::Day,
            |dt| config.is_weekend_day(dt.weekday()),
            other,
            abs,
        )
    }

    /// Seconds elapsed since the local start of day.
    pub fn seconds_since_midnight(&self) -> i64 {
        self.start_of_day().diff_in_seconds(self, true)
    }

    /// Seconds remaining until the local end of day (23:59:59).
    pub fn seconds_until_end_of_day(&self) -> i64 {
        self.diff_in_seconds(&self.end_of_day(), true)
    }
}
