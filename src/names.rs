//! Weekday and month names used by the textual format tokens.

use crate::types::{Month, Weekday};
use crate::DateError;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const WEEKDAYS: usize = 7;
const MONTHS: usize = 12;

static ENGLISH: LazyLock<NameTable> = LazyLock::new(|| NameTable {
    weekday_names:       to_owned(&[
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ]),
    weekday_short_names: to_owned(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
    month_names:         to_owned(&[
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ]),
    month_short_names:   to_owned(&[
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ]),
});

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

/// Full and abbreviated weekday and month names, Sunday first and January first.
///
/// Read-only once built. Loadable from any serde format; lengths are checked on
/// the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NameTableFields")]
pub struct NameTable {
    weekday_names:       Vec<String>,
    weekday_short_names: Vec<String>,
    month_names:         Vec<String>,
    month_short_names:   Vec<String>,
}

#[derive(Deserialize)]
struct NameTableFields {
    weekday_names:       Vec<String>,
    weekday_short_names: Vec<String>,
    month_names:         Vec<String>,
    month_short_names:   Vec<String>,
}

impl TryFrom<NameTableFields> for NameTable {
    type Error = DateError;

    fn try_from(fields: NameTableFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.weekday_names,
            fields.weekday_short_names,
            fields.month_names,
            fields.month_short_names,
        )
    }
}

impl NameTable {
    /// # Errors
    /// Returns `DateError::InvalidNameTable` unless there are exactly 7 weekday
    /// and 12 month names of each kind.
    pub fn new(
        weekday_names: Vec<String>,
        weekday_short_names: Vec<String>,
        month_names: Vec<String>,
        month_short_names: Vec<String>,
    ) -> Result<Self, DateError> {
        check_len("weekday names", &weekday_names, WEEKDAYS)?;
        check_len("weekday short names", &weekday_short_names, WEEKDAYS)?;
        check_len("month names", &month_names, MONTHS)?;
        check_len("month short names", &month_short_names, MONTHS)?;
        Ok(Self {
            weekday_names,
            weekday_short_names,
            month_names,
            month_short_names,
        })
    }

    /// The built-in English table.
    pub fn english() -> &'static Self {
        &ENGLISH
    }

    pub fn weekday(&self, weekday: Weekday) -> &str {
        &self.weekday_names[weekday.index()]
    }

    pub fn weekday_short(&self, weekday: Weekday) -> &str {
        &self.weekday_short_names[weekday.index()]
    }

    pub fn month(&self, month: Month) -> &str {
        &self.month_names[month.index()]
    }

    pub fn month_short(&self, month: Month) -> &str {
        &self.month_short_names[month.index()]
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::english().clone()
    }
}

fn check_len(field: &'static str, names: &[String], expected: usize) -> Result<(), DateError> {
    if names.len() == expected {
        Ok(())
    } else {
        Err(DateError::InvalidNameTable {
            field,
            expected,
            found: names.len(),
        })
    }
}

/// English ordinal suffix: `st`, `nd`, `rd` or `th`.
pub const fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `n` followed by its English ordinal suffix, e.g. `1st`, `12th`, `23rd`.
pub fn ordinal(n: u32) -> String {
    format!("{n}{}", ordinal_suffix(n))
}
