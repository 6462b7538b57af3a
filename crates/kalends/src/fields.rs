//! Field-level access and mutation.
//!
//! The original exposed string-named dynamic getters and setters; here the
//! accessor is a closed enum, so an unknown field is a compile error rather
//! than a runtime one. Setting a field always decomposes the instant into
//! all six civil fields, substitutes the new value, and recomposes through
//! one full normalization pass — never a partial date or time set, which is
//! what makes wraparound (month 13, day 0) well defined.

use crate::error::{KalendsError, Result};
use crate::instant::{days_in_month, normalize_civil, CivilInstant};

/// A civil field of an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Field {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
        }
    }

    /// Static valid range used by the safe setters. The day bound is
    /// refined against the resolved month afterwards.
    fn range(self) -> (i64, i64) {
        match self {
            Field::Year => (0, 9999),
            Field::Month => (0, 12),
            Field::Day => (0, 31),
            Field::Hour => (0, 24),
            Field::Minute | Field::Second => (0, 59),
        }
    }
}

impl CivilInstant {
    /// Read one civil field.
    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::Year => i64::from(self.year()),
            Field::Month => i64::from(self.month()),
            Field::Day => i64::from(self.day()),
            Field::Hour => i64::from(self.hour()),
            Field::Minute => i64::from(self.minute()),
            Field::Second => i64::from(self.second()),
        }
    }

    /// Replace one civil field, normalizing out-of-range values with
    /// wraparound (month 13 rolls into the next year, day 32 into the next
    /// month).
    pub fn with_field(&self, field: Field, value: i64) -> Result<Self> {
        let mut fields = [
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
            i64::from(self.hour()),
            i64::from(self.minute()),
            i64::from(self.second()),
        ];
        fields[field as usize] = value;
        let [year, month, day, hour, minute, second] = fields;
        let naive = normalize_civil(year, month, day, hour, minute, second, self.micro() * 1_000)
            .ok_or_else(|| KalendsError::OutOfRange(format!("{} = {value}", field.name())))?;
        Ok(self.with_naive(naive))
    }

    /// Replace one civil field, rejecting values outside the field's
    /// natural range (and, for days, the resolved month length) before any
    /// value is built.
    pub fn with_field_safe(&self, field: Field, value: i64) -> Result<Self> {
        let (lo, hi) = field.range();
        if value < lo || value > hi {
            return Err(KalendsError::InvalidField {
                field: field.name(),
                value,
            });
        }
        if field == Field::Day {
            let limit = i64::from(days_in_month(self.year(), self.month()));
            if value > limit {
                return Err(KalendsError::InvalidField {
                    field: "day",
                    value,
                });
            }
        }
        self.with_field(field, value)
    }

    pub fn with_year(&self, value: i64) -> Result<Self> {
        self.with_field(Field::Year, value)
    }

    pub fn with_month(&self, value: i64) -> Result<Self> {
        self.with_field(Field::Month, value)
    }

    pub fn with_day(&self, value: i64) -> Result<Self> {
        self.with_field(Field::Day, value)
    }

    pub fn with_hour(&self, value: i64) -> Result<Self> {
        self.with_field(Field::Hour, value)
    }

    pub fn with_minute(&self, value: i64) -> Result<Self> {
        self.with_field(Field::Minute, value)
    }

    pub fn with_second(&self, value: i64) -> Result<Self> {
        self.with_field(Field::Second, value)
    }

    /// Replace the date, keeping the time of day.
    pub fn with_date(&self, year: i64, month: i64, day: i64) -> Result<Self> {
        self.with_date_time(
            year,
            month,
            day,
            i64::from(self.hour()),
            i64::from(self.minute()),
            i64::from(self.second()),
        )
    }

    /// Replace date and time together through one normalization pass.
    pub fn with_date_time(
        &self,
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> Result<Self> {
        let naive = normalize_civil(year, month, day, hour, minute, second, 0).ok_or_else(|| {
            KalendsError::OutOfRange(format!("{year:04}-{month}-{day} {hour}:{minute}:{second}"))
        })?;
        Ok(self.with_naive(naive))
    }

    /// Replace the time of day, keeping the date. Sub-second is zeroed.
    pub fn with_time(&self, hour: i64, minute: i64, second: i64) -> Result<Self> {
        self.with_date_time(
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
            hour,
            minute,
            second,
        )
    }

    /// Move to a new absolute instant, keeping the timezone.
    pub fn with_timestamp(&self, seconds: i64) -> Result<Self> {
        CivilInstant::from_timestamp(seconds, self.timezone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::UTC;

    fn civil(y: i64, m: i64, d: i64, h: i64, min: i64, s: i64) -> CivilInstant {
        CivilInstant::from_civil(UTC, y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn get_reads_each_field() {
        let dt = civil(2016, 5, 17, 9, 30, 15);
        assert_eq!(dt.get(Field::Year), 2016);
        assert_eq!(dt.get(Field::Month), 5);
        assert_eq!(dt.get(Field::Day), 17);
        assert_eq!(dt.get(Field::Hour), 9);
        assert_eq!(dt.get(Field::Minute), 30);
        assert_eq!(dt.get(Field::Second), 15);
    }

    #[test]
    fn setting_month_thirteen_rolls_into_next_year() {
        let dt = civil(2011, 1, 1, 0, 0, 0).with_month(13).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2012, 1, 1));
    }

    #[test]
    fn setting_day_beyond_month_rolls_forward() {
        let dt = civil(2012, 4, 15, 0, 0, 0).with_day(31).unwrap();
        // April has 30 days; day 31 is May 1st.
        assert_eq!((dt.month(), dt.day()), (5, 1));
    }

    #[test]
    fn setting_a_field_keeps_the_others() {
        let dt = civil(2012, 1, 4, 13, 2, 1).with_hour(20).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2012, 1, 4));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (20, 2, 1));
    }

    #[test]
    fn safe_setter_rejects_static_range_violation() {
        let dt = civil(2012, 1, 4, 0, 0, 0);
        let err = dt.with_field_safe(Field::Minute, 61).unwrap_err();
        assert!(matches!(
            err,
            KalendsError::InvalidField {
                field: "minute",
                value: 61
            }
        ));
    }

    #[test]
    fn safe_setter_rejects_day_beyond_month_length() {
        let dt = civil(2011, 2, 1, 0, 0, 0);
        let err = dt.with_field_safe(Field::Day, 29).unwrap_err();
        assert!(matches!(
            err,
            KalendsError::InvalidField {
                field: "day",
                value: 29
            }
        ));
        // The receiver is untouched by the failed attempt.
        assert_eq!((dt.month(), dt.day()), (2, 1));
    }

    #[test]
    fn with_time_zeroes_subseconds() {
        let dt = civil(2012, 1, 4, 13, 2, 1).with_time(8, 15, 0).unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second(), dt.micro()), (8, 15, 0, 0));
    }

    #[test]
    fn with_timestamp_keeps_timezone() {
        let tz = crate::instant::timezone("America/Toronto").unwrap();
        let dt = CivilInstant::from_civil(tz, 2012, 1, 1, 0, 0, 0).unwrap();
        let moved = dt.with_timestamp(0).unwrap();
        assert_eq!(moved.timezone_name(), "America/Toronto");
        assert_eq!(moved.timestamp(), 0);
    }
}
