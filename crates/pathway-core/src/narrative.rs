//! Narrative-grade date and duration formatting.
//!
//! Protocol narratives are compared verbatim in downstream assertions, so
//! everything here is deterministic: fixed English month names, no locale
//! lookup, no relative "ago" phrasing.

use crate::time::months_between;
use time::Date;

/// Display date as "M/D/YY" (no zero padding).
pub fn format_short(date: Date) -> String {
    format!(
        "{}/{}/{:02}",
        date.month() as u8,
        date.day(),
        date.year().rem_euclid(100)
    )
}

/// Display date as "MMMM D, YYYY".
pub fn format_long(date: Date) -> String {
    format!("{} {}, {}", date.month(), date.day(), date.year())
}

/// Granularity for humanized durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Days,
    Weeks,
    Months,
    Years,
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Duration from `from` to `to` as a noun phrase at the given granularity,
/// e.g. "7 months" or "1 year". Endpoints in either order.
pub fn humanize(from: Date, to: Date, granularity: Granularity) -> String {
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    match granularity {
        Granularity::Days => pluralize((to - from).whole_days(), "day"),
        Granularity::Weeks => pluralize((to - from).whole_days() / 7, "week"),
        Granularity::Months => pluralize(months_between(from, to), "month"),
        Granularity::Years => pluralize(months_between(from, to) / 12, "year"),
    }
}
