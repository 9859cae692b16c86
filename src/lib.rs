//! Calendar computations and mask-driven date formatting/parsing.
//!
//! * week numbering under the eight MySQL `WEEK()` modes ([`year_week`], [`week_range`])
//! * day-of-year, days-in-month and leap-year helpers
//! * two formatting dialects: MySQL `DATE_FORMAT()` ([`mysql`]) and PHP `date()` ([`php`])
//! * a strict fixed-width parser for PHP-style masks ([`parse()`])
//!
//! ```
//! use dafo::{LocalDateTime, WeekMode, mysql, php, year_week};
//!
//! let d = LocalDateTime::new(2000, 1, 1)?.with_time(13, 14, 6, 52)?;
//! assert_eq!(mysql::date_format(&d, "%Y-%m-%d %H:%i:%s"), "2000-01-01 13:14:06");
//! assert_eq!(php::date_format(&d, "D, jS M Y"), "Sat, 1st Jan 2000");
//!
//! let yw = year_week(&d, WeekMode::new(2)?);
//! assert_eq!((yw.year, yw.week), (1999, 52));
//! # Ok::<(), dafo::DateError>(())
//! ```

mod calendar;
mod consts;
mod names;
mod parse;
mod prelude;
mod types;
mod week;

pub mod mysql;
pub mod php;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_utils;

pub use calendar::{day_of_year, is_leap_year, month_days};
pub use consts::*;
pub use names::{NameTable, ordinal, ordinal_suffix};
pub use parse::{parse, parse_with_base};
pub use types::{Day, Month, Weekday, days_in_month};
pub use week::{
    FirstWeekday, WeekMode, WeekOneRule, WeekRange, WeekRangeRequest, YearWeek, week_of_year,
    week_range, week1_offset, year_week,
};

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{MAX_EPOCH_DAY, MIN_EPOCH_DAY, civil_from_days, days_from_civil, weekday_of};

/// Errors raised when a calendar value cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid year: {0} (must be {min}..={max})", min = MIN_YEAR, max = MAX_YEAR)]
    InvalidYear(i64),

    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },

    #[error("Invalid hour: {0} (must be 0-{max})", max = MAX_HOUR)]
    InvalidHour(u8),

    #[error("Invalid minute: {0} (must be 0-{max})", max = MAX_MINUTE)]
    InvalidMinute(u8),

    #[error("Invalid second: {0} (must be 0-{max})", max = MAX_SECOND)]
    InvalidSecond(u8),

    #[error("Invalid millisecond: {0} (must be 0-{max})", max = MAX_MILLISECOND)]
    InvalidMillisecond(u16),

    #[error("Invalid UTC offset: {0} minutes (must be within ±{max})", max = MAX_OFFSET_MINUTES)]
    InvalidOffset(i32),

    #[error("Invalid week mode: {0} (must be 0-7)")]
    InvalidWeekMode(u8),

    #[error("Invalid name table: expected {expected} {field}, found {found}")]
    InvalidNameTable {
        field:    &'static str,
        expected: usize,
        found:    usize,
    },
}

/// An immutable calendar date and wall-clock time.
///
/// Weekday and day-of-year are always derived from `(year, month, day)`; there is
/// no way to set them. The optional UTC offset only feeds offset-rendering tokens
/// and [`LocalDateTime::unix_timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalDateTime {
    year:        i32,
    month:       Month,
    day:         Day,
    hour:        u8,
    minute:      u8,
    second:      u8,
    millisecond: u16,
    offset:      Option<i32>,
}

impl LocalDateTime {
    /// 1970-01-01 00:00:00.000, no offset
    pub const UNIX_EPOCH: Self = Self {
        year:        1970,
        month:       Month::JANUARY,
        day:         Day::FIRST,
        hour:        0,
        minute:      0,
        second:      0,
        millisecond: 0,
        offset:      None,
    };

    /// Midnight on the given date.
    ///
    /// # Errors
    /// Returns `DateError` if the year, month or day is out of range.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        if year < MIN_YEAR {
            return Err(DateError::InvalidYear(i64::from(year)));
        }
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
            offset: None,
        })
    }

    /// Same date with the given time of day.
    ///
    /// # Errors
    /// Returns `DateError` if any time field is out of range.
    pub const fn with_time(
        self,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Result<Self, DateError> {
        if hour > MAX_HOUR {
            return Err(DateError::InvalidHour(hour));
        }
        if minute > MAX_MINUTE {
            return Err(DateError::InvalidMinute(minute));
        }
        if second > MAX_SECOND {
            return Err(DateError::InvalidSecond(second));
        }
        if millisecond > MAX_MILLISECOND {
            return Err(DateError::InvalidMillisecond(millisecond));
        }
        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
            ..self
        })
    }

    /// Same wall-clock value, tagged with a UTC offset (east of UTC is positive).
    ///
    /// # Errors
    /// Returns `DateError::InvalidOffset` beyond ±18 hours.
    pub const fn with_offset(self, minutes: i32) -> Result<Self, DateError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(DateError::InvalidOffset(minutes));
        }
        Ok(Self {
            offset: Some(minutes),
            ..self
        })
    }

    /// Same wall-clock value with no UTC offset attached.
    pub const fn without_offset(self) -> Self {
        Self { offset: None, ..self }
    }

    /// The current local date and time, tagged with the local UTC offset.
    ///
    /// # Errors
    /// Returns `DateError` if the system clock reads outside the representable
    /// range.
    pub fn now() -> Result<Self, DateError> {
        Self::try_from(chrono::Local::now().fixed_offset())
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// 1 through 12
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// 1 through the length of the month
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// UTC offset in minutes, if one was attached.
    pub const fn utc_offset_minutes(&self) -> Option<i32> {
        self.offset
    }

    pub const fn weekday(&self) -> Weekday {
        weekday_of(self.year, self.month.get(), self.day.get())
    }

    /// ISO-8601 day number, 1 (Monday) through 7 (Sunday).
    pub const fn iso_weekday(&self) -> u8 {
        self.weekday().number_from_monday()
    }

    /// 1 for January 1st.
    pub fn day_of_year(&self) -> u16 {
        calendar::day_of_year(self)
    }

    /// Days since 1970-01-01 of the calendar date (time of day ignored).
    pub const fn epoch_days(&self) -> i64 {
        days_from_civil(self.year, self.month.get(), self.day.get() as i64)
    }

    /// Seconds since 1970-01-01T00:00:00Z. A missing offset is read as UTC.
    pub const fn unix_timestamp(&self) -> i64 {
        let offset_seconds = match self.offset {
            Some(minutes) => minutes as i64 * 60,
            None => 0,
        };
        self.epoch_days() * SECONDS_PER_DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64
            - offset_seconds
    }

    /// Moves the calendar date by `days`, keeping time of day and offset.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the result leaves the representable years.
    pub fn add_days(&self, days: i64) -> Result<Self, DateError> {
        let target = self
            .epoch_days()
            .checked_add(days)
            .filter(|target| (MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(target))
            .ok_or_else(|| DateError::InvalidYear(i64::from(self.year).saturating_add(days / 365)))?;
        let (year, month, day) = civil_from_days(target);
        let year = i32::try_from(year).map_err(|_| DateError::InvalidYear(year))?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self {
            year,
            month,
            day,
            ..*self
        })
    }
}

impl fmt::Display for LocalDateTime {
    /// `YYYY-MM-DD HH:MM:SS.mmm`, followed by `+hh:mm` when an offset is attached.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year,
            self.month.get(),
            self.day.get(),
            self.hour,
            self.minute,
            self.second,
            self.millisecond
        )?;
        if let Some(offset) = self.offset {
            let sign = if offset < 0 { '-' } else { '+' };
            let offset = offset.abs();
            write!(f, "{sign}{:02}:{:02}", offset / 60, offset % 60)?;
        }
        Ok(())
    }
}

impl TryFrom<chrono::NaiveDateTime> for LocalDateTime {
    type Error = DateError;

    /// Sub-millisecond precision is truncated, a leap second folds into `:59`.
    fn try_from(dt: chrono::NaiveDateTime) -> Result<Self, Self::Error> {
        let second = dt.second().min(u32::from(MAX_SECOND));
        let millisecond = (dt.nanosecond() / 1_000_000).min(u32::from(MAX_MILLISECOND));
        Self::new(dt.year(), narrow(dt.month()), narrow(dt.day()))?.with_time(
            narrow(dt.hour()),
            narrow(dt.minute()),
            narrow(second),
            u16::try_from(millisecond).unwrap_or(u16::MAX),
        )
    }
}

impl TryFrom<chrono::DateTime<chrono::FixedOffset>> for LocalDateTime {
    type Error = DateError;

    fn try_from(dt: chrono::DateTime<chrono::FixedOffset>) -> Result<Self, Self::Error> {
        let minutes = dt.offset().local_minus_utc() / 60;
        Self::try_from(dt.naive_local())?.with_offset(minutes)
    }
}

/// Out-of-range chrono components become `u8::MAX` and fail validation.
fn narrow(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

impl TryFrom<LocalDateTime> for chrono::NaiveDateTime {
    type Error = DateError;

    fn try_from(value: LocalDateTime) -> Result<Self, Self::Error> {
        chrono::NaiveDate::from_ymd_opt(value.year, u32::from(value.month()), u32::from(value.day()))
            .and_then(|date| {
                date.and_hms_milli_opt(
                    u32::from(value.hour),
                    u32::from(value.minute),
                    u32::from(value.second),
                    u32::from(value.millisecond),
                )
            })
            .ok_or(DateError::InvalidYear(i64::from(value.year)))
    }
}

/// Wire shape of [`LocalDateTime`]; validated again on the way in.
#[derive(Serialize, Deserialize)]
struct LocalDateTimeFields {
    year:        i32,
    month:       u8,
    day:         u8,
    #[serde(default)]
    hour:        u8,
    #[serde(default)]
    minute:      u8,
    #[serde(default)]
    second:      u8,
    #[serde(default)]
    millisecond: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    utc_offset:  Option<i32>,
}

impl Serialize for LocalDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        LocalDateTimeFields {
            year:        self.year,
            month:       self.month(),
            day:         self.day(),
            hour:        self.hour,
            minute:      self.minute,
            second:      self.second,
            millisecond: self.millisecond,
            utc_offset:  self.offset,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LocalDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fields = LocalDateTimeFields::deserialize(deserializer)?;
        let value = Self::new(fields.year, fields.month, fields.day)
            .and_then(|d| d.with_time(fields.hour, fields.minute, fields.second, fields.millisecond))
            .and_then(|d| match fields.utc_offset {
                Some(minutes) => d.with_offset(minutes),
                None => Ok(d),
            });
        value.map_err(serde::de::Error::custom)
    }
}
