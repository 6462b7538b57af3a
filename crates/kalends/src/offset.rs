//! Signed field offsets.
//!
//! Every operation takes a signed count; a negative count travels into the
//! past and zero returns an equal value. Day-level offsets work on the
//! local date and keep the wall-clock time of day across DST transitions;
//! sub-day offsets are absolute-instant arithmetic. Counts whose result
//! would leave the representable range saturate at the earliest or latest
//! representable civil date instead of wrapping.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::config::CalendarConfig;
use crate::instant::{days_in_month, normalize_civil, CivilInstant};

impl CivilInstant {
    fn saturated(&self, forward: bool) -> Self {
        let naive = if forward {
            NaiveDate::MAX.and_hms_opt(23, 59, 59).unwrap_or_default()
        } else {
            NaiveDate::MIN.and_time(NaiveTime::default())
        };
        self.with_naive(naive)
    }

    fn shift_instant(&self, delta: Duration) -> Self {
        match self.inner().checked_add_signed(delta) {
            Some(dt) => CivilInstant::from_datetime(dt),
            None => self.saturated(delta >= Duration::zero()),
        }
    }

    /// Add `n` seconds of absolute elapsed time.
    pub fn add_seconds(&self, n: i64) -> Self {
        self.shift_instant(Duration::seconds(n))
    }

    pub fn add_minutes(&self, n: i64) -> Self {
        match n.checked_mul(60) {
            Some(secs) => self.add_seconds(secs),
            None => self.saturated(n > 0),
        }
    }

    pub fn add_hours(&self, n: i64) -> Self {
        match n.checked_mul(3600) {
            Some(secs) => self.add_seconds(secs),
            None => self.saturated(n > 0),
        }
    }

    /// Add `n` calendar days, keeping the wall-clock time of day.
    pub fn add_days(&self, n: i64) -> Self {
        let local = self.naive();
        match local.date().checked_add_signed(Duration::days(n)) {
            Some(date) => self.with_naive(date.and_time(local.time())),
            None => self.saturated(n > 0),
        }
    }

    pub fn add_weeks(&self, n: i64) -> Self {
        match n.checked_mul(7) {
            Some(days) => self.add_days(days),
            None => self.saturated(n > 0),
        }
    }

    /// Add `n` weekdays: steps one calendar day at a time in the sign's
    /// direction and counts only landings outside the configured weekend
    /// set. The original wall-clock time of day is preserved.
    pub fn add_weekdays(&self, n: i64, config: &CalendarConfig) -> Self {
        if n == 0 {
            return *self;
        }
        let step = if n > 0 { 1 } else { -1 };
        let mut remaining = n.unsigned_abs();
        let mut current = *self;
        while remaining > 0 {
            current = current.add_days(step);
            if !config.is_weekend_day(current.weekday()) {
                remaining -= 1;
            }
        }
        current.with_naive(current.naive().date().and_time(self.naive().time()))
    }

    /// Add `n` months under the configured overflow policy.
    pub fn add_months(&self, n: i64, config: &CalendarConfig) -> Self {
        if config.months_overflow {
            self.add_months_with_overflow(n)
        } else {
            self.add_months_no_overflow(n)
        }
    }

    /// Add `n` months with wraparound: a day-of-month past the end of the
    /// target month rolls forward (Jan 31 + 1 month = Mar 3).
    pub fn add_months_with_overflow(&self, n: i64) -> Self {
        let month = match i64::from(self.month()).checked_add(n) {
            Some(month) => month,
            None => return self.saturated(n > 0),
        };
        let local = self.naive();
        match normalize_civil(
            i64::from(self.year()),
            month,
            i64::from(self.day()),
            i64::from(self.hour()),
            i64::from(self.minute()),
            i64::from(self.second()),
            local.time().nanosecond(),
        ) {
            Some(naive) => self.with_naive(naive),
            None => self.saturated(n > 0),
        }
    }

    /// Add `n` months, clamping the day-of-month to the last day of the
    /// intended target month when it is shorter (Jan 31 + 1 month =
    /// Feb 28).
    pub fn add_months_no_overflow(&self, n: i64) -> Self {
        let months0 = i64::from(self.year()) * 12 + i64::from(self.month()) - 1;
        let target = match months0.checked_add(n) {
            Some(target) => target,
            None => return self.saturated(n > 0),
        };
        let year = target.div_euclid(12);
        let month = (target.rem_euclid(12) + 1) as u32;
        let year = match i32::try_from(year) {
            Ok(year) => year,
            Err(_) => return self.saturated(n > 0),
        };
        let day = self.day().min(days_in_month(year, month));
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => self.with_naive(date.and_time(self.naive().time())),
            None => self.saturated(n > 0),
        }
    }

    pub fn add_quarters(&self, n: i64, config: &CalendarConfig) -> Self {
        match n.checked_mul(3) {
            Some(months) => self.add_months(months, config),
            None => self.saturated(n > 0),
        }
    }

    /// Add `n` years with wraparound on the day-of-month, so Feb 29 plus
    /// one year lands on Mar 1.
    pub fn add_years(&self, n: i64) -> Self {
        let year = match i64::from(self.year()).checked_add(n) {
            Some(year) => year,
            None => return self.saturated(n > 0),
        };
        let local = self.naive();
        match normalize_civil(
            year,
            i64::from(self.month()),
            i64::from(self.day()),
            i64::from(self.hour()),
            i64::from(self.minute()),
            i64::from(self.second()),
            local.time().nanosecond(),
        ) {
            Some(naive) => self.with_naive(naive),
            None => self.saturated(n > 0),
        }
    }

    pub fn add_centuries(&self, n: i64) -> Self {
        match n.checked_mul(100) {
            Some(years) => self.add_years(years),
            None => self.saturated(n > 0),
        }
    }

    // Singular conveniences and subtraction forms.

    pub fn add_second(&self) -> Self {
        self.add_seconds(1)
    }

    pub fn add_minute(&self) -> Self {
        self.add_minutes(1)
    }

    pub fn add_hour(&self) -> Self {
        self.add_hours(1)
    }

    pub fn add_day(&self) -> Self {
        self.add_days(1)
    }

    pub fn add_week(&self) -> Self {
        self.add_weeks(1)
    }

    pub fn add_weekday(&self, config: &CalendarConfig) -> Self {
        self.add_weekdays(1, config)
    }

    pub fn add_month(&self, config: &CalendarConfig) -> Self {
        self.add_months(1, config)
    }

    pub fn add_quarter(&self, config: &CalendarConfig) -> Self {
        self.add_quarters(1, config)
    }

    pub fn add_year(&self) -> Self {
        self.add_years(1)
    }

    pub fn add_century(&self) -> Self {
        self.add_centuries(1)
    }

    pub fn sub_seconds(&self, n: i64) -> Self {
        self.add_seconds(n.saturating_neg())
    }

    pub fn sub_minutes(&self, n: i64) -> Self {
        self.add_minutes(n.saturating_neg())
    }

    pub fn sub_hours(&self, n: i64) -> Self {
        self.add_hours(n.saturating_neg())
    }

    pub fn sub_days(&self, n: i64) -> Self {
        self.add_days(n.saturating_neg())
    }

    pub fn sub_weeks(&self, n: i64) -> Self {
        self.add_weeks(n.saturating_neg())
    }

    pub fn sub_weekdays(&self, n: i64, config: &CalendarConfig) -> Self {
        self.add_weekdays(n.saturating_neg(), config)
    }

    pub fn sub_months(&self, n: i64, config: &CalendarConfig) -> Self {
        self.add_months(n.saturating_neg(), config)
    }

    pub fn sub_months_with_overflow(&self, n: i64) -> Self {
        self.add_months_with_overflow(n.saturating_neg())
    }

    pub fn sub_months_no_overflow(&self, n: i64) -> Self {
        self.add_months_no_overflow(n.saturating_neg())
    }

    pub fn sub_quarters(&self, n: i64, config: &CalendarConfig) -> Self {
        self.add_quarters(n.saturating_neg(), config)
    }

    pub fn sub_years(&self, n: i64) -> Self {
        self.add_years(n.saturating_neg())
    }

    pub fn sub_centuries(&self, n: i64) -> Self {
        self.add_centuries(n.saturating_neg())
    }

    pub fn sub_second(&self) -> Self {
        self.sub_seconds(1)
    }

    pub fn sub_minute(&self) -> Self {
        self.sub_minutes(1)
    }

    pub fn sub_hour(&self) -> Self {
        self.sub_hours(1)
    }

    pub fn sub_day(&self) -> Self {
        self.sub_days(1)
    }

    pub fn sub_week(&self) -> Self {
        self.sub_weeks(1)
    }

    pub fn sub_weekday(&self, config: &CalendarConfig) -> Self {
        self.sub_weekdays(1, config)
    }

    pub fn sub_month(&self, config: &CalendarConfig) -> Self {
        self.sub_months(1, config)
    }

    pub fn sub_quarter(&self, config: &CalendarConfig) -> Self {
        self.sub_quarters(1, config)
    }

    pub fn sub_year(&self) -> Self {
        self.sub_years(1)
    }

    pub fn sub_century(&self) -> Self {
        self.sub_centuries(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::UTC;
    use proptest::prelude::*;

    fn civil(y: i64, m: i64, d: i64, h: i64, min: i64, s: i64) -> CivilInstant {
        CivilInstant::from_civil(UTC, y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn add_months_with_overflow_rolls_day_forward() {
        let dt = civil(2012, 1, 31, 0, 0, 0).add_months_with_overflow(1);
        // February 2012 has 29 days; the 31st rolls to March 2nd.
        assert_eq!((dt.year(), dt.month(), dt.day()), (2012, 3, 2));

        let dt = civil(2011, 1, 31, 0, 0, 0).add_months_with_overflow(1);
        assert_eq!((dt.year(), dt.month(), dt.day()), (2011, 3, 3));
    }

    #[test]
    fn add_months_no_overflow_clamps_to_month_end() {
        let dt = civil(2012, 1, 31, 0, 0, 0).add_months_no_overflow(1);
        assert_eq!((dt.year(), dt.month(), dt.day()), (2012, 2, 29));
    }

    #[test]
    fn sub_months_no_overflow_clamps_to_february() {
        let dt = civil(2011, 4, 30, 0, 0, 0).sub_months_no_overflow(2);
        assert_eq!((dt.year(), dt.month(), dt.day()), (2011, 2, 28));
    }

    #[test]
    fn add_months_consults_the_policy() {
        let overflow = CalendarConfig::default();
        let clamp = CalendarConfig {
            months_overflow: false,
            ..CalendarConfig::default()
        };
        let base = civil(2011, 1, 31, 0, 0, 0);
        assert_eq!(base.add_months(1, &overflow).day(), 3);
        assert_eq!(base.add_months(1, &clamp).day(), 28);
    }

    #[test]
    fn add_year_overflows_leap_day() {
        let dt = civil(2012, 2, 29, 0, 0, 0).add_year();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2013, 3, 1));
    }

    #[test]
    fn add_weekdays_skips_weekends_and_keeps_time() {
        let dt = civil(2012, 1, 4, 13, 2, 1).add_weekdays(9, &CalendarConfig::default());
        assert_eq!((dt.year(), dt.month(), dt.day()), (2012, 1, 17));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (13, 2, 1));
    }

    #[test]
    fn sub_weekdays_travels_backward() {
        // 2012-01-17 was a Tuesday; nine weekdays back is Wednesday the 4th.
        let dt = civil(2012, 1, 17, 13, 2, 1).sub_weekdays(9, &CalendarConfig::default());
        assert_eq!((dt.month(), dt.day()), (1, 4));
        assert_eq!(dt.hour(), 13);
    }

    #[test]
    fn add_weekdays_with_custom_weekend() {
        // Friday+Saturday weekend: stepping one weekday from Thursday
        // 2012-01-05 lands on Sunday the 8th.
        let config = CalendarConfig {
            weekend_days: vec![chrono::Weekday::Fri, chrono::Weekday::Sat],
            ..CalendarConfig::default()
        };
        let dt = civil(2012, 1, 5, 9, 0, 0).add_weekdays(1, &config);
        assert_eq!(dt.day(), 8);
    }

    #[test]
    fn add_quarters_is_three_months() {
        let config = CalendarConfig::default();
        let dt = civil(2012, 1, 15, 0, 0, 0).add_quarters(2, &config);
        assert_eq!((dt.month(), dt.day()), (7, 15));
    }

    #[test]
    fn add_centuries_is_a_hundred_years() {
        let dt = civil(1975, 12, 25, 0, 0, 0).add_centuries(2);
        assert_eq!(dt.year(), 2175);
    }

    #[test]
    fn singular_forms_shift_by_one() {
        let config = CalendarConfig::default();
        // Wednesday 2012-01-04.
        let dt = civil(2012, 1, 4, 13, 2, 1);
        assert_eq!(dt.add_day().sub_day(), dt);
        assert_eq!(dt.sub_day().day(), 3);
        assert_eq!(dt.sub_week().day(), 28);
        assert_eq!(dt.sub_weekday(&config).day(), 3);
        assert_eq!((dt.sub_month(&config).year(), dt.sub_month(&config).month()), (2011, 12));
        assert_eq!(dt.sub_quarter(&config).month(), 10);
        assert_eq!(dt.sub_year().year(), 2011);
        assert_eq!(dt.sub_century().year(), 1912);
        assert_eq!(dt.sub_hour().hour(), 12);
        assert_eq!(dt.sub_minute().minute(), 1);
        assert_eq!(dt.sub_second().second(), 0);
    }

    #[test]
    fn add_days_preserves_wall_clock_across_dst() {
        let tz = crate::instant::timezone("America/New_York").unwrap();
        // The night of 2012-03-11 loses an hour; the wall clock holds.
        let dt = CivilInstant::from_civil(tz, 2012, 3, 10, 9, 30, 0).unwrap();
        let next = dt.add_days(1);
        assert_eq!((next.day(), next.hour(), next.minute()), (11, 9, 30));
    }

    #[test]
    fn enormous_offsets_saturate() {
        let dt = civil(2012, 1, 1, 0, 0, 0);
        let far = dt.add_years(i64::MAX);
        assert!(far > dt);
        let near = dt.sub_years(i64::MAX);
        assert!(near < dt);
    }

    proptest! {
        #[test]
        fn zero_offsets_are_no_ops(
            y in 1900i64..2200,
            m in 1i64..=12,
            d in 1i64..=28,
            h in 0i64..24,
        ) {
            let config = CalendarConfig::default();
            let dt = civil(y, m, d, h, 0, 0);
            prop_assert_eq!(dt.add_seconds(0), dt);
            prop_assert_eq!(dt.add_minutes(0), dt);
            prop_assert_eq!(dt.add_hours(0), dt);
            prop_assert_eq!(dt.add_days(0), dt);
            prop_assert_eq!(dt.add_weeks(0), dt);
            prop_assert_eq!(dt.add_weekdays(0, &config), dt);
            prop_assert_eq!(dt.add_months(0, &config), dt);
            prop_assert_eq!(dt.add_years(0), dt);
        }

        #[test]
        fn uniform_unit_offsets_invert(
            y in 1900i64..2200,
            m in 1i64..=12,
            d in 1i64..=28,
            n in -2000i64..2000,
        ) {
            let dt = civil(y, m, d, 11, 7, 3);
            prop_assert_eq!(dt.add_days(n).add_days(-n), dt);
            prop_assert_eq!(dt.add_weeks(n).add_weeks(-n), dt);
            prop_assert_eq!(dt.add_hours(n).add_hours(-n), dt);
            prop_assert_eq!(dt.add_minutes(n).add_minutes(-n), dt);
            prop_assert_eq!(dt.add_seconds(n).add_seconds(-n), dt);
        }

        #[test]
        fn month_and_year_offsets_invert_below_day_29(
            y in 1900i64..2100,
            m in 1i64..=12,
            d in 1i64..=28,
            n in -120i64..120,
        ) {
            // Days past the 28th are not invertible under either month
            // policy (clamping and rolling both lose the original day).
            let dt = civil(y, m, d, 5, 0, 0);
            prop_assert_eq!(dt.add_months_with_overflow(n).add_months_with_overflow(-n), dt);
            prop_assert_eq!(dt.add_months_no_overflow(n).add_months_no_overflow(-n), dt);
            prop_assert_eq!(dt.add_years(n).add_years(-n), dt);
        }

        #[test]
        fn add_weekdays_always_lands_on_a_weekday(
            y in 1950i64..2100,
            m in 1i64..=12,
            d in 1i64..=28,
            n in 1i64..200,
        ) {
            let config = CalendarConfig::default();
            let dt = civil(y, m, d, 12, 0, 0).add_weekdays(n, &config);
            prop_assert!(!config.is_weekend_day(dt.weekday()));
        }
    }
}
