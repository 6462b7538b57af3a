//! # kalends
//!
//! Calendar arithmetic over civil time.
//!
//! Kalends provides an immutable timezone-aware instant with
//! calendar-aware offsets (month overflow policies, weekday stepping),
//! boundary snapping from day to century, structured and filtered diffs,
//! humanized output with pluralizing catalogs, and a small relative
//! expression grammar. Every operation returns a new value; the present
//! moment is always an explicit [`Clock`] argument, never ambient state.
//!
//! ## Modules
//!
//! - [`instant`] — [`CivilInstant`] construction, field access, timezones, serialization
//! - [`fields`] — Single-field substitution with wraparound or validated semantics
//! - [`offset`] — Add/subtract calendar units, month overflow policies, weekday stepping
//! - [`boundary`] — Start/end snapping, weekday seeking, nth-weekday searches
//! - [`diff`] — Structured [`CivilDiff`], scalar diffs, filtered counting
//! - [`humanize`] — "5 days ago" phrasing over a [`Translator`]
//! - [`locale`] — Pluralizing message catalogs
//! - [`compare`] — Ordering wrappers and calendar predicates
//! - [`relative`] — English modifier expressions ("next friday", "+3 days")
//! - [`config`] — [`CalendarConfig`] and the [`Clock`] source of "now"
//! - [`error`] — Error types

pub mod boundary;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod fields;
pub mod humanize;
pub mod instant;
pub mod locale;
pub mod offset;
pub mod relative;

pub use config::{CalendarConfig, Clock};
pub use diff::{CivilDiff, StepUnit};
pub use error::{KalendsError, Result};
pub use fields::Field;
pub use humanize::HumanizeOptions;
pub use instant::{timezone, timezone_from_offset_hours, CivilInstant};
pub use locale::{Catalog, Translator};
