//! Timeframes and calendar arithmetic.
//!
//! A `Timeframe` is a closed-start, open-end interval: a timestamp belongs
//! to the frame when `start <= t < end`. Month and year shifts are
//! calendar-aware with day-of-month clamping (January 31 plus one month is
//! the last day of February).

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime};

/// Serde helpers putting `Date` on the wire as `YYYY-MM-DD`, the form host
/// dumps and recommendation payloads use.
pub mod iso_date {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;
    use time::macros::format_description;

    pub fn serialize<S>(date: &Date, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = format_description!("[year]-[month]-[day]");
        let formatted = date.format(&format).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let format = format_description!("[year]-[month]-[day]");
        Date::parse(&raw, &format).map_err(D::Error::custom)
    }

    /// The same wire form for `Option<Date>`.
    pub mod option {
        use super::*;

        pub fn serialize<S>(
            date: &Option<Date>,
            serializer: S,
        ) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => {
                    let format = format_description!("[year]-[month]-[day]");
                    let formatted = date.format(&format).map_err(serde::ser::Error::custom)?;
                    serializer.serialize_some(&formatted)
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<Date>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            let format = format_description!("[year]-[month]-[day]");
            raw.map(|s| Date::parse(&s, &format).map_err(D::Error::custom))
                .transpose()
        }
    }
}

fn month_from_index(index: i32) -> Month {
    match index {
        0 => Month::January,
        1 => Month::February,
        2 => Month::March,
        3 => Month::April,
        4 => Month::May,
        5 => Month::June,
        6 => Month::July,
        7 => Month::August,
        8 => Month::September,
        9 => Month::October,
        10 => Month::November,
        _ => Month::December,
    }
}

/// Shift a date by whole calendar months, clamping the day of month.
pub fn add_months(date: Date, months: i32) -> Date {
    let total = date.year() * 12 + (date.month() as u8 as i32 - 1) + months;
    let year = total.div_euclid(12);
    let month = month_from_index(total.rem_euclid(12));
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).expect("clamped day is always valid")
}

/// Shift a date by whole calendar years, clamping February 29.
pub fn add_years(date: Date, years: i32) -> Date {
    add_months(date, years * 12)
}

/// Whole calendar months elapsed from `from` to `to` (`from <= to`).
pub fn months_between(from: Date, to: Date) -> i64 {
    let mut diff =
        (to.year() - from.year()) as i64 * 12 + (to.month() as u8 as i64 - from.month() as u8 as i64);
    if to.day() < from.day() && diff > 0 {
        diff -= 1;
    }
    diff
}

/// A calendar-aware shift applied to timeframe endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Days(i64),
    Months(i32),
    Years(i32),
}

impl Shift {
    /// Apply the shift to a timestamp. Days are exact; months and years use
    /// calendar arithmetic.
    pub fn apply(&self, t: OffsetDateTime) -> OffsetDateTime {
        match self {
            Shift::Days(days) => t + Duration::days(*days),
            Shift::Months(months) => t.replace_date(add_months(t.date(), *months)),
            Shift::Years(years) => t.replace_date(add_years(t.date(), *years)),
        }
    }

    /// The shift of equal magnitude in the opposite direction.
    pub fn negated(&self) -> Shift {
        match self {
            Shift::Days(days) => Shift::Days(-days),
            Shift::Months(months) => Shift::Months(-months),
            Shift::Years(years) => Shift::Years(-years),
        }
    }

    fn is_backward(&self) -> bool {
        match self {
            Shift::Days(days) => *days < 0,
            Shift::Months(months) => *months < 0,
            Shift::Years(years) => *years < 0,
        }
    }
}

/// A `[start, end)` interval over evaluation-clock timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

impl Timeframe {
    /// Create a timeframe; `start` must not be after `end`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self> {
        if start > end {
            return Err(CoreError::invalid_timeframe(
                start.to_string(),
                end.to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The frame ending at `end` and looking back by `lookback`.
    ///
    /// `Timeframe::ending_at(now, Shift::Months(27))` is the past 27 months.
    pub fn ending_at(end: OffsetDateTime, lookback: Shift) -> Self {
        Self {
            start: lookback.negated().apply(end),
            end,
        }
    }

    /// Half-open containment: `start <= t < end`.
    pub fn contains(&self, t: OffsetDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Whole days between the endpoints.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).whole_days()
    }

    /// Both endpoints moved by `shift`.
    pub fn shifted_by(&self, shift: Shift) -> Self {
        Self {
            start: shift.apply(self.start),
            end: shift.apply(self.end),
        }
    }

    /// The window extended by `shift`: a forward shift pushes `end` later, a
    /// backward shift pulls `start` earlier.
    pub fn increased_by(&self, shift: Shift) -> Self {
        if shift.is_backward() {
            Self {
                start: shift.apply(self.start),
                end: self.end,
            }
        } else {
            Self {
                start: self.start,
                end: shift.apply(self.end),
            }
        }
    }

    /// Overlap of two frames, when non-empty.
    pub fn intersection(&self, other: &Timeframe) -> Option<Timeframe> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Timeframe { start, end })
    }
}
