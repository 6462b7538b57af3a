//! The civil-time value type and its constructors.
//!
//! A [`CivilInstant`] is an absolute instant paired with an IANA timezone,
//! observed through civil calendar fields (year, month, day, hour, minute,
//! second). The value is immutable: every operation in this crate returns a
//! new instant and never mutates the receiver, so two independently-held
//! values can never observe one mutation.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike,
    Utc, Weekday,
};
use chrono_tz::Tz;
use serde::de::Error as SerdeDeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Clock;
use crate::error::{KalendsError, Result};

/// A timezone-aware point in civil time.
///
/// Comparison and equality are by absolute instant, regardless of timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilInstant {
    dt: DateTime<Tz>,
}

// ── Timezone resolution ─────────────────────────────────────────────────────

/// Resolve an IANA timezone name.
pub fn timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| KalendsError::InvalidTimezone(format!("'{name}'")))
}

/// Resolve a fixed UTC offset (whole hours only) to a timezone.
///
/// Backed by the `Etc/GMT±H` zones, whose sign is inverted relative to the
/// conventional offset notation: UTC+2 is `Etc/GMT-2`.
pub fn timezone_from_offset_hours(hours: i32) -> Result<Tz> {
    if !(-12..=14).contains(&hours) {
        return Err(KalendsError::InvalidTimezone(format!(
            "offset {hours} hours"
        )));
    }
    let name = if hours <= 0 {
        format!("Etc/GMT+{}", -hours)
    } else {
        format!("Etc/GMT-{hours}")
    };
    timezone(&name)
}

// ── Civil normalization (crate-internal) ────────────────────────────────────

/// Normalize possibly out-of-range civil fields into a concrete local
/// datetime, using the wraparound rule the unsafe setters rely on:
///
/// 1. seconds carry into minutes, minutes into hours, hours into days;
/// 2. the month carries into the year (month 13 is next January, month 0
///    the previous December);
/// 3. the date is the first of the normalized month plus (day - 1) days,
///    so day 32 of a 31-day month lands on day 1 of the next month and
///    day 0 on the last day of the previous month.
///
/// Returns `None` when the result leaves chrono's representable range.
pub(crate) fn normalize_civil(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    nanos: u32,
) -> Option<NaiveDateTime> {
    let mut minute = minute + second.div_euclid(60);
    let second = second.rem_euclid(60);
    let mut hour = hour + minute.div_euclid(60);
    minute = minute.rem_euclid(60);
    let day_carry = hour.div_euclid(24);
    hour = hour.rem_euclid(24);

    let months_total = month - 1;
    let year = year + months_total.div_euclid(12);
    let month = months_total.rem_euclid(12) + 1;

    let year = i32::try_from(year).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month as u32, 1)?;
    let date = first.checked_add_signed(Duration::days(day - 1 + day_carry))?;
    let time = NaiveTime::from_hms_nano_opt(hour as u32, minute as u32, second as u32, nanos)?;
    Some(date.and_time(time))
}

/// Like [`normalize_civil`] but clamps to the representable range instead
/// of failing, so the infallible offset operations saturate rather than
/// wrap silently.
pub(crate) fn normalize_civil_saturating(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    nanos: u32,
) -> NaiveDateTime {
    if let Some(naive) = normalize_civil(year, month, day, hour, minute, second, nanos) {
        return naive;
    }
    if year > 0 {
        NaiveDate::MAX.and_hms_opt(23, 59, 59).unwrap_or_default()
    } else {
        NaiveDate::MIN.and_time(NaiveTime::default())
    }
}

/// Number of days in a month.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let first_next = NaiveDate::from_ymd_opt(ny, nm, 1);
    match (first, first_next) {
        (Some(a), Some(b)) => (b - a).num_days() as u32,
        _ => 0,
    }
}

/// Map a local datetime into `tz`, resolving DST folds to the earlier
/// offset and DST gaps by shifting forward an hour at a time.
pub(crate) fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..3 {
        match tz.from_local_datetime(&candidate) {
            chrono::LocalResult::Single(dt) => return dt,
            chrono::LocalResult::Ambiguous(earliest, _) => return earliest,
            chrono::LocalResult::None => {
                candidate = candidate + Duration::hours(1);
            }
        }
    }
    // No real timezone has a gap this wide; fall back to reading the
    // fields as UTC.
    tz.from_utc_datetime(&naive)
}

// ── Constructors ────────────────────────────────────────────────────────────

impl CivilInstant {
    pub(crate) fn from_datetime(dt: DateTime<Tz>) -> Self {
        CivilInstant { dt }
    }

    /// The instant `utc` observed in `tz`.
    pub fn from_utc(utc: DateTime<Utc>, tz: Tz) -> Self {
        CivilInstant {
            dt: utc.with_timezone(&tz),
        }
    }

    /// The current instant in `tz`, per the given clock.
    pub fn now(tz: Tz, clock: &Clock) -> Self {
        clock.now(tz)
    }

    /// Start of the current day in `tz`.
    pub fn today(tz: Tz, clock: &Clock) -> Self {
        clock.now(tz).start_of_day()
    }

    /// Start of the next day in `tz`.
    pub fn tomorrow(tz: Tz, clock: &Clock) -> Self {
        Self::today(tz, clock).add_days(1)
    }

    /// Start of the previous day in `tz`.
    pub fn yesterday(tz: Tz, clock: &Clock) -> Self {
        Self::today(tz, clock).add_days(-1)
    }

    /// An instant from explicit civil fields with wraparound normalization
    /// (see [`normalize_civil`] for the rule).
    pub fn from_civil(
        tz: Tz,
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
        Ok(CivilInstant {
            dt: resolve_local(tz, naive),
        })
    }

    /// An instant from optional civil fields, filling gaps from the clock.
    ///
    /// Missing date fields default from now. A missing hour takes now's
    /// time of day (including its minute and second defaults); once the
    /// hour is given, missing minute and second default to zero. Provided
    /// values follow the wraparound rule, so month 13 rolls into the next
    /// year.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        tz: Tz,
        clock: &Clock,
        year: Option<i64>,
        month: Option<i64>,
        day: Option<i64>,
        hour: Option<i64>,
        minute: Option<i64>,
        second: Option<i64>,
    ) -> Result<Self> {
        let now = clock.now(tz);
        let (minute, second) = match hour {
            None => (
                minute.unwrap_or(i64::from(now.minute())),
                second.unwrap_or(i64::from(now.second())),
            ),
            Some(_) => (minute.unwrap_or(0), second.unwrap_or(0)),
        };
        Self::from_civil(
            tz,
            year.unwrap_or(i64::from(now.year())),
            month.unwrap_or(i64::from(now.month())),
            day.unwrap_or(i64::from(now.day())),
            hour.unwrap_or(i64::from(now.hour())),
            minute,
            second,
        )
    }

    /// Like [`CivilInstant::create`], but every provided field is validated
    /// against its natural range before any value is built: year 0–9999,
    /// month 0–12, day 0–31, hour 0–24, minute and second 0–59, and
    /// finally day against the actual length of the resolved month. The
    /// first offending field is reported in [`KalendsError::InvalidField`].
    #[allow(clippy::too_many_arguments)]
    pub fn create_safe(
        tz: Tz,
        clock: &Clock,
        year: Option<i64>,
        month: Option<i64>,
        day: Option<i64>,
        hour: Option<i64>,
        minute: Option<i64>,
        second: Option<i64>,
    ) -> Result<Self> {
        let ranges: [(&'static str, Option<i64>, i64, i64); 6] = [
            ("year", year, 0, 9999),
            ("month", month, 0, 12),
            ("day", day, 0, 31),
            ("hour", hour, 0, 24),
            ("minute", minute, 0, 59),
            ("second", second, 0, 59),
        ];
        for (field, value, lo, hi) in ranges {
            if let Some(value) = value {
                if value < lo || value > hi {
                    return Err(KalendsError::InvalidField { field, value });
                }
            }
        }

        let instant = Self::create(tz, clock, year, month, Some(1), hour, minute, second)?;
        let day = match day {
            None => i64::from(clock.now(tz).day()),
            Some(day) => day,
        };
        if day > i64::from(days_in_month(instant.year(), instant.month())) {
            return Err(KalendsError::InvalidField { field: "day", value: day });
        }
        instant.with_field(crate::fields::Field::Day, day)
    }

    /// An instant from just a date; the time of day comes from the clock.
    pub fn from_date(
        tz: Tz,
        clock: &Clock,
        year: Option<i64>,
        month: Option<i64>,
        day: Option<i64>,
    ) -> Result<Self> {
        Self::create(tz, clock, year, month, day, None, None, None)
    }

    /// An instant from just a time of day; the date comes from the clock.
    pub fn from_time(
        tz: Tz,
        clock: &Clock,
        hour: Option<i64>,
        minute: Option<i64>,
        second: Option<i64>,
    ) -> Result<Self> {
        Self::create(tz, clock, None, None, None, hour, minute, second)
    }

    /// An instant from seconds since the Unix epoch, observed in `tz`.
    pub fn from_timestamp(seconds: i64, tz: Tz) -> Result<Self> {
        let utc = DateTime::<Utc>::from_timestamp(seconds, 0)
            .ok_or_else(|| KalendsError::OutOfRange(format!("timestamp {seconds}")))?;
        Ok(Self::from_utc(utc, tz))
    }

    /// Parse an RFC 3339 datetime string and observe it in `tz`.
    pub fn parse_rfc3339(s: &str, tz: Tz) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| CivilInstant {
                dt: dt.with_timezone(&tz),
            })
            .map_err(|e| KalendsError::ParseFailure(format!("'{s}': {e}")))
    }
}

// ── Derived fields ──────────────────────────────────────────────────────────

impl CivilInstant {
    pub fn year(&self) -> i32 {
        self.dt.year()
    }

    /// ISO 8601 week-numbering year.
    pub fn year_iso(&self) -> i32 {
        self.dt.iso_week().year()
    }

    /// Month of year, 1–12.
    pub fn month(&self) -> u32 {
        self.dt.month()
    }

    /// Day of month, 1–31.
    pub fn day(&self) -> u32 {
        self.dt.day()
    }

    /// Hour of day, 0–23.
    pub fn hour(&self) -> u32 {
        self.dt.hour()
    }

    pub fn minute(&self) -> u32 {
        self.dt.minute()
    }

    pub fn second(&self) -> u32 {
        self.dt.second()
    }

    /// Microsecond component, 0–999999.
    pub fn micro(&self) -> u32 {
        self.dt.nanosecond() / 1_000
    }

    /// Day of week as a number, 0 for Sunday through 6 for Saturday.
    pub fn day_of_week(&self) -> u32 {
        self.dt.weekday().num_days_from_sunday()
    }

    pub fn weekday(&self) -> Weekday {
        self.dt.weekday()
    }

    /// Day of year, 0-based (0 through 365).
    pub fn day_of_year(&self) -> u32 {
        self.dt.ordinal0()
    }

    /// ISO 8601 week of year, 1–53.
    pub fn week_of_year(&self) -> u32 {
        self.dt.iso_week().week()
    }

    /// Week of month, 1–5.
    pub fn week_of_month(&self) -> u32 {
        self.day().div_ceil(7)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Quarter of year, 1–4.
    pub fn quarter(&self) -> u32 {
        self.month().div_ceil(3)
    }

    /// UTC offset in seconds at this instant.
    pub fn utc_offset(&self) -> i32 {
        self.dt.offset().fix().local_minus_utc()
    }

    /// Whether daylight saving time is in effect at this instant.
    ///
    /// The standard offset is taken as the smaller of the zone's January
    /// and July offsets, so the check holds in both hemispheres.
    pub fn is_dst(&self) -> bool {
        let tz = self.dt.timezone();
        let year = self.year();
        let probe = |month: u32| {
            Utc.with_ymd_and_hms(year, month, 1, 12, 0, 0)
                .single()
                .map(|dt| dt.with_timezone(&tz).offset().fix().local_minus_utc())
        };
        match (probe(1), probe(7)) {
            (Some(jan), Some(jul)) => self.utc_offset() > jan.min(jul),
            _ => false,
        }
    }

    pub fn is_leap_year(&self) -> bool {
        NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some()
    }

    /// Seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.dt.timestamp()
    }

    pub fn timezone(&self) -> Tz {
        self.dt.timezone()
    }

    pub fn timezone_name(&self) -> &'static str {
        self.dt.timezone().name()
    }

    /// This instant in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.dt.with_timezone(&Utc)
    }

    /// The same instant observed in a different timezone.
    pub fn with_timezone(&self, tz: Tz) -> Self {
        CivilInstant {
            dt: self.dt.with_timezone(&tz),
        }
    }

    pub fn to_rfc3339(&self) -> String {
        self.dt.to_rfc3339()
    }

    /// Local civil fields as a naive datetime.
    pub(crate) fn naive(&self) -> NaiveDateTime {
        self.dt.naive_local()
    }

    pub(crate) fn inner(&self) -> DateTime<Tz> {
        self.dt
    }

    /// Rebuild this instant from new local fields, keeping the timezone.
    pub(crate) fn with_naive(&self, naive: NaiveDateTime) -> Self {
        CivilInstant {
            dt: resolve_local(self.dt.timezone(), naive),
        }
    }
}

impl std::fmt::Display for CivilInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dt.format("%Y-%m-%d %H:%M:%S"))
    }
}

// ── Serialization ───────────────────────────────────────────────────────────

/// Persisted identifying state: civil fields plus timezone name.
#[derive(Debug, Serialize, Deserialize)]
struct CivilRepr {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    #[serde(default)]
    micro: u32,
    timezone: String,
}

impl CivilInstant {
    fn to_repr(&self) -> CivilRepr {
        CivilRepr {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            micro: self.micro(),
            timezone: self.timezone_name().to_string(),
        }
    }

    fn from_repr(repr: CivilRepr) -> Result<Self> {
        let reject = |detail: String| KalendsError::InvalidSerializedState(detail);
        let tz = repr
            .timezone
            .parse::<Tz>()
            .map_err(|_| reject(format!("unknown timezone '{}'", repr.timezone)))?;
        let date = NaiveDate::from_ymd_opt(repr.year, repr.month, repr.day)
            .ok_or_else(|| reject(format!("{}-{}-{}", repr.year, repr.month, repr.day)))?;
        let time = NaiveTime::from_hms_micro_opt(repr.hour, repr.minute, repr.second, repr.micro)
            .ok_or_else(|| {
                reject(format!("{}:{}:{}.{}", repr.hour, repr.minute, repr.second, repr.micro))
            })?;
        let naive = date.and_time(time);
        match tz.from_local_datetime(&naive) {
            chrono::LocalResult::Single(dt) => Ok(CivilInstant { dt }),
            chrono::LocalResult::Ambiguous(earliest, _) => Ok(CivilInstant { dt: earliest }),
            chrono::LocalResult::None => Err(reject(format!(
                "{naive} does not exist in {}",
                repr.timezone
            ))),
        }
    }
}

impl Serialize for CivilInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CivilInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = CivilRepr::deserialize(deserializer)?;
        CivilInstant::from_repr(repr).map_err(D::Error::custom)
    }
}
