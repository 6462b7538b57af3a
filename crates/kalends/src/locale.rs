//! Pluralizing message catalogs for humanized output.
//!
//! A catalog maps unit keys to choice strings of the form
//! `"1 year|:count years"`: the first alternative is used when the count
//! is exactly one, the last otherwise, with `:count` substituted. Tense
//! wrappers (`ago`, `from_now`, `before`, `after`) substitute `:time`.
//! Combined keys such as `year_from_now` take precedence over the
//! unit-plus-wrapper fallback when a catalog defines them.

use std::collections::HashMap;

use crate::error::{KalendsError, Result};

/// Message lookup for humanized diffs. `None` from either method means
/// the key is absent and the caller should fall back.
pub trait Translator {
    /// Pluralized unit phrase, e.g. `("day", 3)` to `"3 days"`.
    fn trans_choice(&self, key: &str, count: i64) -> Option<String>;

    /// Tense wrapper, e.g. `("ago", "3 days")` to `"3 days ago"`.
    fn trans(&self, key: &str, time: &str) -> Option<String>;
}

/// A [`Translator`] backed by a flat key-to-choice-string map.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Catalog { messages }
    }

    /// The built-in English catalog.
    pub fn english() -> Self {
        let pairs = [
            ("year", "1 year|:count years"),
            ("month", "1 month|:count months"),
            ("week", "1 week|:count weeks"),
            ("day", "1 day|:count days"),
            ("hour", "1 hour|:count hours"),
            ("minute", "1 minute|:count minutes"),
            ("second", "1 second|:count seconds"),
            ("y", ":county"),
            ("m", ":countm"),
            ("w", ":countw"),
            ("d", ":countd"),
            ("h", ":counth"),
            ("min", ":countmin"),
            ("s", ":counts"),
            ("ago", ":time ago"),
            ("from_now", ":time from now"),
            ("after", ":time after"),
            ("before", ":time before"),
        ];
        Catalog {
            messages: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Load a catalog from a JSON object of string keys to choice
    /// strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let messages: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| KalendsError::ParseFailure(format!("catalog JSON: {e}")))?;
        Ok(Catalog { messages })
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }
}

impl Translator for Catalog {
    fn trans_choice(&self, key: &str, count: i64) -> Option<String> {
        let message = self.messages.get(key)?;
        let mut choices = message.split('|');
        let singular = choices.next()?;
        let plural = choices.last().unwrap_or(singular);
        let chosen = if count == 1 { singular } else { plural };
        Some(chosen.replace(":count", &count.to_string()))
    }

    fn trans(&self, key: &str, time: &str) -> Option<String> {
        self.messages.get(key).map(|m| m.replace(":time", time))
    }
}
