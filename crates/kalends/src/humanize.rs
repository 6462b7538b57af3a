//! Human-readable phrases for the span between instants.
//!
//! The largest non-zero calendar component wins, with one twist carried
//! over from how people speak: a span of 7 to 27 leftover days reads as
//! weeks. A span below one second still reads as "1 second" so the output
//! never says "0 seconds ago".
//!
//! A combined catalog key such as `day_ago` is taken as a complete
//! phrase: it carries its own tense, so the tense wrapper is applied only
//! to plain unit keys. Catalogs whose tense phrasing cannot be expressed
//! as a `:time` wrapper define combined keys instead.

use crate::config::Clock;
use crate::diff::CivilDiff;
use crate::instant::CivilInstant;
use crate::locale::Translator;

/// Output options for [`CivilInstant::diff_for_humans`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanizeOptions {
    /// Drop the tense wrapper ("5 days" instead of "5 days ago").
    pub absolute: bool,
    /// Use the compact unit keys ("5d" instead of "5 days").
    pub short: bool,
}

fn select_unit(diff: &CivilDiff) -> (&'static str, &'static str, i64) {
    if diff.years > 0 {
        ("year", "y", i64::from(diff.years))
    } else if diff.months > 0 {
        ("month", "m", i64::from(diff.months))
    } else if diff.days >= 7 {
        ("week", "w", i64::from(diff.days / 7))
    } else if diff.days > 0 {
        ("day", "d", i64::from(diff.days))
    } else if diff.hours > 0 {
        ("hour", "h", i64::from(diff.hours))
    } else if diff.minutes > 0 {
        ("minute", "min", i64::from(diff.minutes))
    } else {
        ("second", "s", i64::from(diff.seconds).max(1))
    }
}

fn phrase<T: Translator + ?Sized>(
    diff: &CivilDiff,
    tense_key: &str,
    options: HumanizeOptions,
    translator: &T,
) -> String {
    let (long, short, count) = select_unit(diff);
    let unit_key = if options.short { short } else { long };

    if !options.absolute {
        // A combined key like "day_ago" carries its own tense.
        let combined = format!("{unit_key}_{tense_key}");
        if let Some(message) = translator.trans_choice(&combined, count) {
            return message;
        }
    }

    let time = translator
        .trans_choice(unit_key, count)
        .unwrap_or_else(|| {
            let plural = if count == 1 { "" } else { "s" };
            format!("{count} {long}{plural}")
        });

    if options.absolute {
        return time;
    }
    translator
        .trans(tense_key, &time)
        .unwrap_or_else(|| format!("{time} {}", tense_key.replace('_', " ")))
}

impl CivilInstant {
    /// Phrase for the span between this instant and `other`, e.g.
    /// "1 month before" or "5 days after".
    pub fn diff_for_humans<T: Translator + ?Sized>(
        &self,
        other: &Self,
        options: HumanizeOptions,
        translator: &T,
    ) -> String {
        let diff = self.diff(other);
        let tense_key = if diff.inverted { "after" } else { "before" };
        phrase(&diff, tense_key, options, translator)
    }

    /// Phrase for the span between this instant and the clock's present,
    /// e.g. "5 days ago" or "1 hour from now".
    pub fn diff_for_humans_now<T: Translator + ?Sized>(
        &self,
        clock: &Clock,
        options: HumanizeOptions,
        translator: &T,
    ) -> String {
        let now = clock.now(self.timezone());
        let diff = self.diff(&now);
        let tense_key = if diff.inverted { "from_now" } else { "ago" };
        phrase(&diff, tense_key, options, translator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Catalog;
    use chrono_tz::UTC;

    fn civil(y: i64, m: i64, d: i64, h: i64, min: i64, s: i64) -> CivilInstant {
        CivilInstant::from_civil(UTC, y, m, d, h, min, s).unwrap()
    }

    fn now() -> CivilInstant {
        civil(2012, 1, 15, 12, 0, 0)
    }

    fn humanize_now(dt: &CivilInstant) -> String {
        dt.diff_for_humans_now(
            &Clock::fixed(&now()),
            HumanizeOptions::default(),
            &Catalog::english(),
        )
    }

    #[test]
    fn past_spans_read_ago() {
        assert_eq!(humanize_now(&now().sub_seconds(5)), "5 seconds ago");
        assert_eq!(humanize_now(&now().sub_minutes(1)), "1 minute ago");
        assert_eq!(humanize_now(&now().sub_hours(2)), "2 hours ago");
        assert_eq!(humanize_now(&now().sub_days(3)), "3 days ago");
        assert_eq!(humanize_now(&now().sub_months(2, &Default::default())), "2 months ago");
        assert_eq!(humanize_now(&now().sub_years(1)), "1 year ago");
    }

    #[test]
    fn future_spans_read_from_now() {
        assert_eq!(humanize_now(&now().add_seconds(5)), "5 seconds from now");
        assert_eq!(humanize_now(&now().add_years(3)), "3 years from now");
    }

    #[test]
    fn a_week_or_more_of_days_reads_as_weeks() {
        assert_eq!(humanize_now(&now().sub_days(7)), "1 week ago");
        assert_eq!(humanize_now(&now().sub_weeks(4)), "4 weeks ago");
        assert_eq!(humanize_now(&now().sub_days(6)), "6 days ago");
        // A month and change reads as months, never as weeks.
        assert_eq!(humanize_now(&now().sub_days(40)), "1 month ago");
    }

    #[test]
    fn sub_second_spans_never_read_zero() {
        assert_eq!(humanize_now(&now()), "1 second ago");
    }

    #[test]
    fn comparand_spans_read_before_and_after() {
        let opts = HumanizeOptions::default();
        let catalog = Catalog::english();
        let a = civil(2012, 1, 1, 0, 0, 0);
        let b = civil(2012, 1, 6, 0, 0, 0);
        assert_eq!(a.diff_for_humans(&b, opts, &catalog), "5 days before");
        assert_eq!(b.diff_for_humans(&a, opts, &catalog), "5 days after");
    }

    #[test]
    fn absolute_drops_the_tense() {
        let opts = HumanizeOptions {
            absolute: true,
            ..HumanizeOptions::default()
        };
        let dt = now().sub_days(3);
        assert_eq!(
            dt.diff_for_humans_now(&Clock::fixed(&now()), opts, &Catalog::english()),
            "3 days"
        );
    }

    #[test]
    fn short_uses_compact_units() {
        let opts = HumanizeOptions {
            short: true,
            ..HumanizeOptions::default()
        };
        let dt = now().sub_days(3);
        assert_eq!(
            dt.diff_for_humans_now(&Clock::fixed(&now()), opts, &Catalog::english()),
            "3d ago"
        );
    }

    #[test]
    fn combined_keys_take_precedence() {
        let mut catalog = Catalog::english();
        catalog.insert("day_ago", "hace 1 dia|hace :count dias");
        let dt = now().sub_days(3);
        assert_eq!(
            dt.diff_for_humans_now(&Clock::fixed(&now()), HumanizeOptions::default(), &catalog),
            "hace 3 dias"
        );
    }

    #[test]
    fn unknown_units_fall_back_to_english_words() {
        // An empty catalog still produces a readable phrase.
        let catalog = Catalog::default();
        let dt = now().sub_days(1);
        assert_eq!(
            dt.diff_for_humans_now(&Clock::fixed(&now()), HumanizeOptions::default(), &catalog),
            "1 day ago"
        );
        let dt = now().add_days(2);
        assert_eq!(
            dt.diff_for_humans_now(&Clock::fixed(&now()), HumanizeOptions::default(), &catalog),
            "2 days from now"
        );
    }
}
