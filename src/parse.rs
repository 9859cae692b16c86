//! Strict fixed-width parsing of PHP-style masks.
//!
//! Recognised placeholders, each consuming a fixed number of ASCII digits:
//!
//! | Placeholder | Width | Range     |
//! |-------------|-------|-----------|
//! | `Y`         | 4     | 0000-9999 |
//! | `m`         | 2     | 01-12     |
//! | `d`         | 2     | 01-31     |
//! | `H`         | 2     | 00-23     |
//! | `i`         | 2     | 00-59     |
//! | `s`         | 2     | 00-59     |
//!
//! Every other mask character must appear verbatim in the text. Unlike the
//! formatters, parsing is strict: any mismatch, out-of-range field or leftover
//! text yields `None`.

use crate::consts::{JANUARY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MIN_DAY};
use crate::types::days_in_month;
use crate::{DateError, LocalDateTime, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
}

/// Why a parse was abandoned; only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum ParseFailure {
    #[error("expected {width} digits of {field} at byte {at}, found {found:?}")]
    NotNumeric {
        field: Field,
        width: usize,
        at:    usize,
        found: String,
    },

    #[error("{field} {value} at byte {at} is outside {min}..={max}")]
    OutOfRange {
        field: Field,
        value: u16,
        min:   u16,
        max:   u16,
        at:    usize,
    },

    #[error("expected {expected:?} at byte {at}, found {found:?}")]
    LiteralMismatch {
        expected: char,
        found:    Option<char>,
        at:       usize,
    },

    #[error("unexpected trailing text {0:?}")]
    TrailingText(String),

    #[error(transparent)]
    Invalid(#[from] DateError),
}

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    field: Field,
    width: usize,
    min:   u16,
    max:   u16,
}

impl Placeholder {
    fn of(c: char) -> Option<Self> {
        let (field, width, min, max) = match c {
            'Y' => (Field::Year, 4, 0, 9999),
            'm' => (Field::Month, 2, u16::from(JANUARY), u16::from(MAX_MONTH)),
            'd' => (Field::Day, 2, u16::from(MIN_DAY), 31),
            'H' => (Field::Hour, 2, 0, u16::from(MAX_HOUR)),
            'i' => (Field::Minute, 2, 0, u16::from(MAX_MINUTE)),
            's' => (Field::Second, 2, 0, u16::from(MAX_SECOND)),
            _ => return None,
        };
        Some(Self {
            field,
            width,
            min,
            max,
        })
    }

    /// Reads this placeholder from the front of `rest`, returning the value and what follows.
    fn take<'t>(&self, rest: &'t str, at: usize) -> Result<(u16, &'t str), ParseFailure> {
        let not_numeric = || ParseFailure::NotNumeric {
            field: self.field,
            width: self.width,
            at,
            found: rest.chars().take(self.width).collect(),
        };

        let digits = rest.get(..self.width).ok_or_else(not_numeric)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_numeric());
        }
        let value: u16 = digits.parse().map_err(|_| not_numeric())?;
        if !(self.min..=self.max).contains(&value) {
            return Err(ParseFailure::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
                at,
            });
        }
        Ok((value, &rest[self.width..]))
    }
}

/// Fields read from the text; absent ones come from the base.
#[derive(Debug, Clone, Copy, Default)]
struct ParsedFields {
    year:   Option<u16>,
    month:  Option<u16>,
    day:    Option<u16>,
    hour:   Option<u16>,
    minute: Option<u16>,
    second: Option<u16>,
}

impl ParsedFields {
    const fn set(&mut self, field: Field, value: u16) {
        let slot = match field {
            Field::Year => &mut self.year,
            Field::Month => &mut self.month,
            Field::Day => &mut self.day,
            Field::Hour => &mut self.hour,
            Field::Minute => &mut self.minute,
            Field::Second => &mut self.second,
        };
        *slot = Some(value);
    }

    /// Applies the parsed fields onto `base`.
    ///
    /// A parsed day past the end of the resulting month rolls over into the next
    /// one (`02-30` becomes March 2nd). An inherited day is clamped to the month's
    /// length instead, so parsing `02` with mask `m` on a base of January 31st
    /// lands on the last day of February.
    fn apply(&self, base: &LocalDateTime) -> Result<LocalDateTime, DateError> {
        let year = self.year.map_or(base.year(), i32::from);
        let month = narrow(self.month, base.month());
        let date = match self.day {
            Some(day) => LocalDateTime::new(year, month, MIN_DAY)?.add_days(i64::from(day) - 1)?,
            None => LocalDateTime::new(year, month, base.day().min(days_in_month(year, month)))?,
        };

        let value = date.with_time(
            narrow(self.hour, base.hour()),
            narrow(self.minute, base.minute()),
            narrow(self.second, base.second()),
            base.millisecond(),
        )?;
        match base.utc_offset_minutes() {
            Some(minutes) => value.with_offset(minutes),
            None => Ok(value),
        }
    }
}

fn narrow(value: Option<u16>, fallback: u8) -> u8 {
    value.and_then(|v| u8::try_from(v).ok()).unwrap_or(fallback)
}

fn parse_fields(text: &str, mask: &str) -> Result<ParsedFields, ParseFailure> {
    let mut fields = ParsedFields::default();
    let mut rest = text;

    for expected in mask.chars() {
        let at = text.len() - rest.len();
        if let Some(placeholder) = Placeholder::of(expected) {
            let (value, tail) = placeholder.take(rest, at)?;
            fields.set(placeholder.field, value);
            rest = tail;
            continue;
        }

        let mut chars = rest.chars();
        match chars.next() {
            Some(found) if found == expected => rest = chars.as_str(),
            found => {
                return Err(ParseFailure::LiteralMismatch {
                    expected,
                    found,
                    at,
                });
            },
        }
    }

    if rest.is_empty() {
        Ok(fields)
    } else {
        Err(ParseFailure::TrailingText(rest.to_owned()))
    }
}

/// Parses `text` against `mask`, filling fields the mask lacks from the current
/// local time.
///
/// Two calls with a partial mask (say `"H:i:s"`) may therefore land on different
/// dates; use [`parse_with_base`] for a deterministic result.
///
/// ```
/// let d = dafo::parse("2019-04-01", "Y-m-d").unwrap();
/// assert_eq!((d.year(), d.month(), d.day()), (2019, 4, 1));
///
/// assert!(dafo::parse("2019.04", "Y-m").is_none());
/// assert!(dafo::parse("13", "m").is_none());
/// ```
pub fn parse(text: &str, mask: &str) -> Option<LocalDateTime> {
    match LocalDateTime::now() {
        Ok(base) => parse_with_base(text, mask, base),
        Err(err) => {
            log::debug!("Failed to read the current time as a parse base: {err}");
            None
        },
    }
}

/// Parses `text` against `mask`, filling fields the mask lacks from `base`.
///
/// Millisecond and UTC offset always come from `base`. Returns `None` on any
/// failure; the reason is logged at debug level.
pub fn parse_with_base(text: &str, mask: &str, base: LocalDateTime) -> Option<LocalDateTime> {
    let result = parse_fields(text, mask).and_then(|fields| fields.apply(&base).map_err(ParseFailure::from));
    match result {
        Ok(value) => Some(value),
        Err(failure) => {
            log::debug!("Failed to parse {text:?} with mask {mask:?}: {failure}");
            None
        },
    }
}
