//! Relative-expression modifiers.
//!
//! [`CivilInstant::modify`] applies a small English expression grammar:
//!
//! - `"+3 days"`, `"-2 months"`, `"1 week"` (sign optional)
//! - `"next tuesday"`, `"last friday"`
//! - `"second monday of march 2013"`, `"last sunday of july"`
//! - `"first day of next month"`, `"last day of previous month"`
//! - `"today"`, `"tomorrow"`, `"yesterday"`
//!
//! Anything else fails with a diagnostic naming the offending token.

use chrono::Weekday;

use crate::config::CalendarConfig;
use crate::error::{KalendsError, Result};
use crate::instant::CivilInstant;

fn parse_weekday(word: &str) -> Option<Weekday> {
    match word {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month(word: &str) -> Option<u32> {
    match word {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

/// Ordinal position, `None` meaning "last".
fn parse_ordinal(word: &str) -> Option<Option<u32>> {
    match word {
        "first" | "1st" => Some(Some(1)),
        "second" | "2nd" => Some(Some(2)),
        "third" | "3rd" => Some(Some(3)),
        "fourth" | "4th" => Some(Some(4)),
        "fifth" | "5th" => Some(Some(5)),
        "last" => Some(None),
        _ => None,
    }
}

fn parse_failure(expr: &str, detail: &str) -> KalendsError {
    KalendsError::ParseFailure(format!("cannot interpret \"{expr}\": {detail}"))
}

impl CivilInstant {
    /// Apply a relative English expression to this instant and return the
    /// shifted copy.
    pub fn modify(&self, expr: &str, config: &CalendarConfig) -> Result<Self> {
        let normalized = expr.trim().to_ascii_lowercase();
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Err(parse_failure(expr, "empty expression")),
            ["today"] => Ok(self.start_of_day()),
            ["tomorrow"] => Ok(self.start_of_day().add_days(1)),
            ["yesterday"] => Ok(self.start_of_day().sub_days(1)),
            ["next", day] => {
                let weekday =
                    parse_weekday(day).ok_or_else(|| parse_failure(expr, "unknown weekday"))?;
                Ok(self.next(Some(weekday)))
            }
            ["last", day] if parse_weekday(day).is_some() => {
                // Checked by the guard.
                let weekday = parse_weekday(day).unwrap_or(Weekday::Mon);
                Ok(self.previous(Some(weekday)))
            }
            [count, unit] => self.offset_clause(expr, count, unit, config),
            [ordinal, "day", "of", scope, "month"] => {
                let anchor = match *scope {
                    "this" => *self,
                    "next" => self.add_months(1, config),
                    "previous" | "prev" => self.sub_months(1, config),
                    _ => return Err(parse_failure(expr, "unknown month scope")),
                };
                match parse_ordinal(ordinal) {
                    Some(Some(1)) => Ok(anchor.first_of_month(None)),
                    Some(None) => Ok(anchor.last_of_month(None)),
                    _ => Err(parse_failure(expr, "day-of-month ordinal must be first or last")),
                }
            }
            [ordinal, day, "of", month, rest @ ..] => {
                self.nth_weekday_clause(expr, ordinal, day, month, rest)
            }
            _ => Err(parse_failure(expr, "unrecognized expression")),
        }
    }

    fn offset_clause(
        &self,
        expr: &str,
        count: &str,
        unit: &str,
        config: &CalendarConfig,
    ) -> Result<Self> {
        let n: i64 = count
            .parse()
            .map_err(|_| parse_failure(expr, "count is not an integer"))?;
        match unit.trim_end_matches('s') {
            "year" => Ok(self.add_years(n)),
            "quarter" => Ok(self.add_quarters(n, config)),
            "month" => Ok(self.add_months(n, config)),
            "week" => Ok(self.add_weeks(n)),
            "weekday" => Ok(self.add_weekdays(n, config)),
            "day" => Ok(self.add_days(n)),
            "hour" => Ok(self.add_hours(n)),
            "minute" | "min" => Ok(self.add_minutes(n)),
            "second" | "sec" => Ok(self.add_seconds(n)),
            _ => Err(parse_failure(expr, "unknown unit")),
        }
    }

    fn nth_weekday_clause(
        &self,
        expr: &str,
        ordinal: &str,
        day: &str,
        month: &str,
        rest: &[&str],
    ) -> Result<Self> {
        let nth = parse_ordinal(ordinal).ok_or_else(|| parse_failure(expr, "unknown ordinal"))?;
        let weekday = parse_weekday(day).ok_or_else(|| parse_failure(expr, "unknown weekday"))?;
        let month = parse_month(month).ok_or_else(|| parse_failure(expr, "unknown month"))?;
        let year = match rest {
            [] => i64::from(self.year()),
            [y] => y
                .parse()
                .map_err(|_| parse_failure(expr, "year is not an integer"))?,
            _ => return Err(parse_failure(expr, "unrecognized expression")),
        };
        let anchor = Self::from_civil(self.timezone(), year, i64::from(month), 1, 0, 0, 0)?;
        match nth {
            None => Ok(anchor.last_of_month(Some(weekday))),
            Some(nth) => anchor.nth_of_month(nth, weekday).ok_or_else(|| {
                KalendsError::OutOfRange(format!(
                    "no occurrence {nth} of that weekday in {year}-{month:02}"
                ))
            }),
        }
    }
}
