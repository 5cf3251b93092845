//! Timestamp generators.

use chrono::{Local, NaiveDateTime, SubsecRound, TimeDelta};
use metrics_core::{TimestampWindow, MAX_TIMESTAMP_DAYS, MAX_TIMESTAMP_EXTRA_MILLIS};
use rand::Rng;

/// Where "now" comes from when stamping records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeSource {
    /// Local wall clock, read once per record.
    #[default]
    System,
    /// Fixed reference instant.
    Fixed(NaiveDateTime),
}

impl TimeSource {
    /// Current reference instant, truncated to microseconds.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            TimeSource::System => Local::now().naive_local().trunc_subsecs(6),
            TimeSource::Fixed(now) => now.trunc_subsecs(6),
        }
    }
}

/// Random offset: whole days plus extra milliseconds, drawn independently.
pub fn generate_offset<R: Rng>(rng: &mut R, window: &TimestampWindow) -> TimeDelta {
    let days = rng.gen_range(0..=i64::from(window.max_days.min(MAX_TIMESTAMP_DAYS)));
    let millis = rng.gen_range(0..=window.max_extra_millis.min(MAX_TIMESTAMP_EXTRA_MILLIS));
    TimeDelta::days(days) + TimestampWindow::extra_millis(millis)
}

/// Generate `now - offset`, saturating at the earliest representable instant.
pub fn generate_timestamp<R: Rng>(
    rng: &mut R,
    now: NaiveDateTime,
    window: &TimestampWindow,
) -> NaiveDateTime {
    now.checked_sub_signed(generate_offset(rng, window))
        .unwrap_or(NaiveDateTime::MIN)
}
