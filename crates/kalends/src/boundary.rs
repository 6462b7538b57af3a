//! Boundary snapping and calendar navigation.
//!
//! Start/end snaps for day through century, configured-week snapping,
//! weekday seeking, and nth-weekday-of-period searches. The nth-weekday
//! searches return `None` when the requested occurrence falls outside the
//! bounding period; that is an expected outcome, not an error.

use chrono::Weekday;

use crate::config::CalendarConfig;
use crate::instant::{normalize_civil_saturating, CivilInstant};

/// Days from `from` forward to the next occurrence of `to`, 0–6.
fn days_until(from: Weekday, to: Weekday) -> i64 {
    i64::from((to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7)
}

impl CivilInstant {
    fn snapped(&self, year: i64, month: i64, day: i64, end: bool) -> Self {
        // Microsecond resolution: the serialized form stores micros, so a
        // finer end-of-period value would not survive a round trip.
        let naive = if end {
            normalize_civil_saturating(year, month, day, 23, 59, 59, 999_999_000)
        } else {
            normalize_civil_saturating(year, month, day, 0, 0, 0, 0)
        };
        self.with_naive(naive)
    }

    /// Time to 00:00:00.0.
    pub fn start_of_day(&self) -> Self {
        self.snapped(
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
            false,
        )
    }

    /// Time to 23:59:59.999999.
    pub fn end_of_day(&self) -> Self {
        self.snapped(
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
            true,
        )
    }

    pub fn start_of_month(&self) -> Self {
        self.snapped(i64::from(self.year()), i64::from(self.month()), 1, false)
    }

    pub fn end_of_month(&self) -> Self {
        self.snapped(
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.days_in_month()),
            true,
        )
    }

    pub fn start_of_quarter(&self) -> Self {
        let month = (self.quarter() - 1) * 3 + 1;
        self.snapped(i64::from(self.year()), i64::from(month), 1, false)
    }

    pub fn end_of_quarter(&self) -> Self {
        self.start_of_quarter().add_months_with_overflow(2).end_of_month()
    }

    pub fn start_of_year(&self) -> Self {
        self.snapped(i64::from(self.year()), 1, 1, false)
    }

    pub fn end_of_year(&self) -> Self {
        self.snapped(i64::from(self.year()), 12, 31, true)
    }

    pub fn start_of_decade(&self) -> Self {
        let year = self.year() - self.year().rem_euclid(10);
        self.snapped(i64::from(year), 1, 1, false)
    }

    pub fn end_of_decade(&self) -> Self {
        let year = self.year() - self.year().rem_euclid(10) + 9;
        self.snapped(i64::from(year), 12, 31, true)
    }

    /// First day of the century. Centuries run 1–100, 101–200, ...: the
    /// 21st century starts in 2001, so the boundary arithmetic is on
    /// (year - 1), not year.
    pub fn start_of_century(&self) -> Self {
        let year = self.year() - (self.year() - 1).rem_euclid(100);
        self.snapped(i64::from(year), 1, 1, false)
    }

    pub fn end_of_century(&self) -> Self {
        let year = self.year() - 1 - (self.year() - 1).rem_euclid(100) + 100;
        self.snapped(i64::from(year), 12, 31, true)
    }

    /// Back to the configured first day of the week, at start of day.
    pub fn start_of_week(&self, config: &CalendarConfig) -> Self {
        let back = days_until(config.week_starts_at, self.weekday());
        self.sub_days(back).start_of_day()
    }

    /// Forward to the configured last day of the week, at end of day.
    pub fn end_of_week(&self, config: &CalendarConfig) -> Self {
        let forward = days_until(self.weekday(), config.week_ends_at);
        self.add_days(forward).end_of_day()
    }

    /// The next occurrence of `weekday` (default: the current weekday,
    /// i.e. one week ahead), at start of day. Always moves at least one
    /// day.
    pub fn next(&self, weekday: Option<Weekday>) -> Self {
        let target = weekday.unwrap_or_else(|| self.weekday());
        let mut forward = days_until(self.weekday(), target);
        if forward == 0 {
            forward = 7;
        }
        self.start_of_day().add_days(forward)
    }

    /// The previous occurrence of `weekday` (default: the current
    /// weekday), at start of day. Always moves at least one day.
    pub fn previous(&self, weekday: Option<Weekday>) -> Self {
        let target = weekday.unwrap_or_else(|| self.weekday());
        let mut back = days_until(target, self.weekday());
        if back == 0 {
            back = 7;
        }
        self.start_of_day().sub_days(back)
    }

    fn next_or_previous_day(&self, want_weekday: bool, forward: bool, config: &CalendarConfig) -> Self {
        let step = if forward { 1 } else { -1 };
        let mut current = *self;
        loop {
            current = current.add_days(step);
            if config.is_weekend_day(current.weekday()) != want_weekday {
                return current;
            }
        }
    }

    /// Forward to the next non-weekend day.
    pub fn next_weekday(&self, config: &CalendarConfig) -> Self {
        self.next_or_previous_day(true, true, config)
    }

    /// Backward to the previous non-weekend day.
    pub fn previous_weekday(&self, config: &CalendarConfig) -> Self {
        self.next_or_previous_day(true, false, config)
    }

    /// Forward to the next weekend day.
    pub fn next_weekend_day(&self, config: &CalendarConfig) -> Self {
        self.next_or_previous_day(false, true, config)
    }

    /// Backward to the previous weekend day.
    pub fn previous_weekend_day(&self, config: &CalendarConfig) -> Self {
        self.next_or_previous_day(false, false, config)
    }

    /// First day of the month, or the first occurrence of `weekday` in the
    /// month, at start of day.
    pub fn first_of_month(&self, weekday: Option<Weekday>) -> Self {
        let first = self.snapped(i64::from(self.year()), i64::from(self.month()), 1, false);
        match weekday {
            None => first,
            Some(target) => first.add_days(days_until(first.weekday(), target)),
        }
    }

    /// Last day of the month, or the last occurrence of `weekday` in the
    /// month, at start of day.
    pub fn last_of_month(&self, weekday: Option<Weekday>) -> Self {
        let last = self.snapped(
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.days_in_month()),
            false,
        );
        match weekday {
            None => last,
            Some(target) => last.sub_days(days_until(target, last.weekday())),
        }
    }

    /// The `nth` occurrence of `weekday` in the current month, at start of
    /// day, or `None` when the month has no such occurrence.
    pub fn nth_of_month(&self, nth: u32, weekday: Weekday) -> Option<Self> {
        if nth == 0 {
            return None;
        }
        let candidate = self
            .first_of_month(Some(weekday))
            .add_weeks(i64::from(nth) - 1);
        (candidate.month() == self.month() && candidate.year() == self.year()).then_some(candidate)
    }

    /// First day of the quarter, or the first occurrence of `weekday` in
    /// the quarter's first month.
    pub fn first_of_quarter(&self, weekday: Option<Weekday>) -> Self {
        let month = self.quarter() * 3 - 2;
        self.snapped(i64::from(self.year()), i64::from(month), 1, false)
            .first_of_month(weekday)
    }

    /// Last day of the quarter, or the last occurrence of `weekday` in the
    /// quarter's last month.
    pub fn last_of_quarter(&self, weekday: Option<Weekday>) -> Self {
        let month = self.quarter() * 3;
        self.snapped(i64::from(self.year()), i64::from(month), 1, false)
            .last_of_month(weekday)
    }

    /// The `nth` occurrence of `weekday` in the current quarter, or `None`
    /// when the quarter has no such occurrence.
    pub fn nth_of_quarter(&self, nth: u32, weekday: Weekday) -> Option<Self> {
        if nth == 0 {
            return None;
        }
        let start = self.first_of_quarter(None);
        let candidate = start
            .add_days(days_until(start.weekday(), weekday))
            .add_weeks(i64::from(nth) - 1);
        (candidate.year() == self.year() && candidate.quarter() == self.quarter())
            .then_some(candidate)
    }

    /// First day of the year, or the first occurrence of `weekday` in
    /// January.
    pub fn first_of_year(&self, weekday: Option<Weekday>) -> Self {
        self.snapped(i64::from(self.year()), 1, 1, false)
            .first_of_month(weekday)
    }

    /// Last day of the year, or the last occurrence of `weekday` in
    /// December.
    pub fn last_of_year(&self, weekday: Option<Weekday>) -> Self {
        self.snapped(i64::from(self.year()), 12, 1, false)
            .last_of_month(weekday)
    }

    /// The `nth` occurrence of `weekday` in the current year, or `None`
    /// when the year has no such occurrence.
    pub fn nth_of_year(&self, nth: u32, weekday: Weekday) -> Option<Self> {
        if nth == 0 {
            return None;
        }
        let start = self.first_of_year(None);
        let candidate = start
            .add_days(days_until(start.weekday(), weekday))
            .add_weeks(i64::from(nth) - 1);
        (candidate.year() == self.year()).then_some(candidate)
    }

    /// The midpoint (by elapsed seconds, truncated toward zero) between
    /// this instant and `other`.
    pub fn average(&self, other: &Self) -> Self {
        let elapsed = (other.to_utc() - self.to_utc()).num_seconds();
        self.add_seconds(elapsed / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::UTC;

    fn civil(y: i64, m: i64, d: i64, h: i64, min: i64, s: i64) -> CivilInstant {
        CivilInstant::from_civil(UTC, y, m, d, h, min, s).unwrap()
    }

    fn ymd(dt: &CivilInstant) -> (i32, u32, u32) {
        (dt.year(), dt.month(), dt.day())
    }

    #[test]
    fn day_boundaries() {
        let dt = civil(2012, 1, 31, 13, 2, 1);
        let start = dt.start_of_day();
        assert_eq!((start.hour(), start.minute(), start.second(), start.micro()), (0, 0, 0, 0));
        let end = dt.end_of_day();
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.micro(), 999_999);
        assert_eq!(ymd(&end), (2012, 1, 31));
    }

    #[test]
    fn month_boundaries() {
        let dt = civil(2012, 2, 15, 13, 2, 1);
        assert_eq!(ymd(&dt.start_of_month()), (2012, 2, 1));
        assert_eq!(ymd(&dt.end_of_month()), (2012, 2, 29));
    }

    #[test]
    fn quarter_boundaries() {
        let dt = civil(2012, 5, 15, 0, 0, 0);
        assert_eq!(ymd(&dt.start_of_quarter()), (2012, 4, 1));
        assert_eq!(ymd(&dt.end_of_quarter()), (2012, 6, 30));
    }

    #[test]
    fn decade_boundaries() {
        let dt = civil(2012, 5, 15, 0, 0, 0);
        assert_eq!(ymd(&dt.start_of_decade()), (2010, 1, 1));
        assert_eq!(ymd(&dt.end_of_decade()), (2019, 12, 31));
    }

    #[test]
    fn century_boundary_belongs_to_the_previous_hundred() {
        // Centuries run 2001-2100, not 2000-2099.
        assert_eq!(civil(2001, 1, 1, 0, 0, 0).start_of_century().year(), 2001);
        assert_eq!(civil(2000, 6, 1, 0, 0, 0).start_of_century().year(), 1901);
        assert_eq!(civil(2100, 12, 31, 0, 0, 0).end_of_century().year(), 2100);
        assert_eq!(civil(2099, 6, 1, 0, 0, 0).end_of_century().year(), 2100);
    }

    #[test]
    fn week_boundaries_follow_the_config() {
        // 2012-01-04 was a Wednesday.
        let dt = civil(2012, 1, 4, 13, 2, 1);
        let config = CalendarConfig::default();
        assert_eq!(ymd(&dt.start_of_week(&config)), (2012, 1, 2));
        assert_eq!(ymd(&dt.end_of_week(&config)), (2012, 1, 8));

        let sunday_start = CalendarConfig {
            week_starts_at: Weekday::Sun,
            week_ends_at: Weekday::Sat,
            ..CalendarConfig::default()
        };
        assert_eq!(ymd(&dt.start_of_week(&sunday_start)), (2012, 1, 1));
        assert_eq!(ymd(&dt.end_of_week(&sunday_start)), (2012, 1, 7));
    }

    #[test]
    fn next_always_moves_at_least_one_day() {
        // From Wednesday, next Wednesday is a week out.
        let dt = civil(2012, 1, 4, 13, 2, 1);
        let next = dt.next(None);
        assert_eq!(ymd(&next), (2012, 1, 11));
        assert_eq!(next.hour(), 0);

        assert_eq!(ymd(&dt.next(Some(Weekday::Thu))), (2012, 1, 5));
        assert_eq!(ymd(&dt.previous(Some(Weekday::Thu))), (2011, 12, 29));
        assert_eq!(ymd(&dt.previous(None)), (2011, 12, 28));
    }

    #[test]
    fn weekday_seeking_always_steps() {
        let config = CalendarConfig::default();
        // Friday 2012-01-06.
        let friday = civil(2012, 1, 6, 9, 0, 0);
        assert_eq!(ymd(&friday.next_weekday(&config)), (2012, 1, 9));
        assert_eq!(ymd(&friday.next_weekend_day(&config)), (2012, 1, 7));
        assert_eq!(ymd(&friday.previous_weekday(&config)), (2012, 1, 5));
        assert_eq!(ymd(&friday.previous_weekend_day(&config)), (2012, 1, 1));
    }

    #[test]
    fn first_and_last_of_month() {
        let dt = civil(1975, 12, 5, 0, 0, 0);
        assert_eq!(ymd(&dt.first_of_month(None)), (1975, 12, 1));
        assert_eq!(ymd(&dt.last_of_month(None)), (1975, 12, 31));
        // December 1975 started on a Monday and ended on a Wednesday.
        assert_eq!(ymd(&dt.first_of_month(Some(Weekday::Mon))), (1975, 12, 1));
        assert_eq!(ymd(&dt.first_of_month(Some(Weekday::Sun))), (1975, 12, 7));
        assert_eq!(ymd(&dt.last_of_month(Some(Weekday::Wed))), (1975, 12, 31));
        assert_eq!(ymd(&dt.last_of_month(Some(Weekday::Sun))), (1975, 12, 28));
    }

    #[test]
    fn nth_of_month_finds_the_occurrence() {
        let dt = civil(1975, 12, 5, 0, 0, 0);
        let second_monday = dt.nth_of_month(2, Weekday::Mon).unwrap();
        assert_eq!(ymd(&second_monday), (1975, 12, 8));
        assert_eq!(second_monday.hour(), 0);
    }

    #[test]
    fn nth_of_month_returns_none_past_the_month() {
        // No month has six Mondays.
        let dt = civil(2012, 1, 15, 0, 0, 0);
        assert!(dt.nth_of_month(6, Weekday::Mon).is_none());
        assert!(dt.nth_of_month(0, Weekday::Mon).is_none());
        // January 2012 had five Mondays.
        let fifth = dt.nth_of_month(5, Weekday::Mon).unwrap();
        assert_eq!(ymd(&fifth), (2012, 1, 30));
    }

    #[test]
    fn quarter_navigation() {
        let dt = civil(1975, 11, 21, 0, 0, 0);
        assert_eq!(ymd(&dt.first_of_quarter(None)), (1975, 10, 1));
        assert_eq!(ymd(&dt.last_of_quarter(None)), (1975, 12, 31));
        // First Monday of Q4 1975 was October 6th.
        assert_eq!(ymd(&dt.first_of_quarter(Some(Weekday::Mon))), (1975, 10, 6));
        // The 2nd Monday of the quarter.
        assert_eq!(ymd(&dt.nth_of_quarter(2, Weekday::Mon).unwrap()), (1975, 10, 13));
        assert!(dt.nth_of_quarter(20, Weekday::Mon).is_none());
    }

    #[test]
    fn year_navigation() {
        let dt = civil(1975, 6, 5, 0, 0, 0);
        assert_eq!(ymd(&dt.first_of_year(None)), (1975, 1, 1));
        assert_eq!(ymd(&dt.last_of_year(None)), (1975, 12, 31));
        // 1975 began on a Wednesday.
        assert_eq!(ymd(&dt.first_of_year(Some(Weekday::Mon))), (1975, 1, 6));
        assert_eq!(ymd(&dt.nth_of_year(3, Weekday::Mon).unwrap()), (1975, 1, 20));
        assert!(dt.nth_of_year(60, Weekday::Mon).is_none());
    }

    #[test]
    fn average_is_the_truncated_midpoint() {
        let a = civil(2000, 1, 1, 0, 0, 0);
        let b = civil(2000, 1, 3, 0, 0, 1);
        let mid = a.average(&b);
        assert_eq!(ymd(&mid), (2000, 1, 2));
        assert_eq!((mid.hour(), mid.minute(), mid.second()), (0, 0, 0));
        // Averaging backward truncates toward zero as well.
        let mid = b.average(&a);
        assert_eq!(ymd(&mid), (2000, 1, 2));
        assert_eq!((mid.hour(), mid.minute(), mid.second()), (0, 0, 1));
    }

    #[test]
    fn average_with_itself_is_identity() {
        let a = civil(2000, 1, 1, 12, 0, 0);
        assert_eq!(a.average(&a), a);
    }
}
