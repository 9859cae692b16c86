//! MySQL `DATE_FORMAT()` dialect: every token is introduced by `%`.
//!
//! | Token | Renders                                              |
//! |-------|------------------------------------------------------|
//! | `%a`  | abbreviated weekday name                             |
//! | `%b`  | abbreviated month name                               |
//! | `%c`  | month, `1`..`12`                                     |
//! | `%D`  | day of month with English suffix, `1st`              |
//! | `%d`  | day of month, `01`..`31`                             |
//! | `%e`  | day of month, `1`..`31`                              |
//! | `%f`  | microseconds, `000000`..`999000`                     |
//! | `%H`  | hour, `00`..`23`                                     |
//! | `%h`  | hour, `01`..`12` (`%I` is the same)                  |
//! | `%i`  | minutes, `00`..`59`                                  |
//! | `%j`  | day of year, `001`..`366`                            |
//! | `%k`  | hour, `0`..`23`                                      |
//! | `%l`  | hour, `1`..`12`                                      |
//! | `%M`  | month name                                           |
//! | `%m`  | month, `01`..`12`                                    |
//! | `%p`  | `AM` or `PM`                                         |
//! | `%r`  | 12-hour time, `hh:mm:ss AM`                          |
//! | `%S`  | seconds, `00`..`59` (`%s` is the same)               |
//! | `%T`  | 24-hour time, `hh:mm:ss`                             |
//! | `%U`  | week, mode 0                                         |
//! | `%u`  | week, mode 1                                         |
//! | `%V`  | week, mode 2, used with `%X`                         |
//! | `%v`  | week, mode 3, used with `%x`                         |
//! | `%W`  | weekday name                                         |
//! | `%w`  | weekday, `0` (Sunday)..`6`                           |
//! | `%X`  | year of `%V`, four digits                            |
//! | `%x`  | year of `%v`, four digits                            |
//! | `%Y`  | year, four digits                                    |
//! | `%y`  | year, two digits                                     |
//!
//! Any other `%x` renders as `x`, so `%%` is a literal percent sign.

use crate::consts::MYSQL_ESCAPE;
use crate::names::{NameTable, ordinal};
use crate::scan::{self, Replacement, Token, resolve_alias};
use crate::week::{WeekMode, year_week};
use crate::{LocalDateTime, prelude::*};
use serde::{Deserialize, Serialize};

type Render = fn(&LocalDateTime, &NameTable) -> String;

/// Renders dates with a borrowed [`NameTable`].
#[derive(Debug, Clone, Copy)]
pub struct MysqlFormatter<'a> {
    names: &'a NameTable,
}

impl<'a> MysqlFormatter<'a> {
    pub const fn new(names: &'a NameTable) -> Self {
        Self { names }
    }

    /// Renders `date` through `mask`. Never fails; unknown tokens render as the
    /// character after `%`.
    pub fn format(&self, date: &LocalDateTime, mask: &str) -> String {
        scan::scan(mask, MYSQL_ESCAPE, |mask: &str, cursor: usize| {
            let token = mask[cursor..].chars().next()?;
            self.render(date, token).map(Replacement::from)
        })
    }

    /// Renders a single token character, `None` if it is not a token.
    pub fn render(&self, date: &LocalDateTime, token: char) -> Option<String> {
        resolve_alias(token, lookup).map(|render| render(date, self.names))
    }
}

impl Default for MysqlFormatter<'static> {
    fn default() -> Self {
        Self::new(NameTable::english())
    }
}

/// Formats `date` with English names, as MySQL `DATE_FORMAT(date, mask)`.
///
/// ```
/// use dafo::{LocalDateTime, mysql};
///
/// let d = LocalDateTime::new(2000, 11, 1)?;
/// assert_eq!(mysql::date_format(&d, "%W %D %M %Y, day %j"), "Wednesday 1st November 2000, day 306");
/// assert_eq!(mysql::date_format(&d, "100%% %q"), "100% q");
/// # Ok::<(), dafo::DateError>(())
/// ```
pub fn date_format(date: &LocalDateTime, mask: &str) -> String {
    MysqlFormatter::default().format(date, mask)
}

/// Renders `mask` by mapping every character through the token table; used by
/// the composite tokens, whose sub-masks carry no `%`.
fn combine(date: &LocalDateTime, names: &NameTable, mask: &str) -> String {
    mask.chars()
        .map(|c| match resolve_alias(c, lookup) {
            Some(render) => render(date, names),
            None => c.to_string(),
        })
        .collect()
}

fn lookup(token: char) -> Option<Token<Render>> {
    let render: Render = match token {
        'a' => |d, names| names.weekday_short(d.weekday()).to_owned(),
        'b' => |d, names| names.month_short(d.month_typed()).to_owned(),
        'c' => |d, _| d.month().to_string(),
        'D' => |d, _| ordinal(u32::from(d.day())),
        'd' => |d, _| pad(d.day(), 2),
        'e' => |d, _| d.day().to_string(),
        'f' => |d, _| format!("{}000", pad(d.millisecond(), 3)),
        'H' => |d, _| pad(d.hour(), 2),
        'h' => |d, _| pad(hour12(d), 2),
        'I' => return Some(Token::Alias('h')),
        'i' => |d, _| pad(d.minute(), 2),
        'j' => |d, _| pad(d.day_of_year(), 3),
        'k' => |d, _| d.hour().to_string(),
        'l' => |d, _| hour12(d).to_string(),
        'M' => |d, names| names.month(d.month_typed()).to_owned(),
        'm' => |d, _| pad(d.month(), 2),
        'p' => |d, _| String::from(if d.hour() < 12 { "AM" } else { "PM" }),
        'r' => |d, names| combine(d, names, "h:i:s p"),
        'S' => |d, _| pad(d.second(), 2),
        's' => return Some(Token::Alias('S')),
        'T' => |d, names| combine(d, names, "H:i:s"),
        'U' => |d, _| week(d, WeekMode::SUNDAY_0_53),
        'u' => |d, _| week(d, WeekMode::MONDAY_0_53),
        'V' => |d, _| week(d, WeekMode::SUNDAY_1_53),
        'v' => |d, _| week(d, WeekMode::ISO),
        'W' => |d, names| names.weekday(d.weekday()).to_owned(),
        'w' => |d, _| d.weekday().number_from_sunday().to_string(),
        'X' => |d, _| pad(year_week(d, WeekMode::SUNDAY_1_53).year, 4),
        'x' => |d, _| pad(year_week(d, WeekMode::ISO).year, 4),
        'Y' => |d, _| pad(d.year(), 4),
        'y' => |d, _| two_digit_year(d.year()),
        _ => return None,
    };
    Some(Token::Render(render))
}

fn week(date: &LocalDateTime, mode: WeekMode) -> String {
    pad(year_week(date, mode).week, 2)
}

/// 12-hour clock hour, `1`..`12`.
pub(crate) const fn hour12(date: &LocalDateTime) -> u8 {
    match date.hour() % 12 {
        0 => 12,
        hour => hour,
    }
}

/// Zero-pads to `width` digits; a negative sign is placed in front of the padding.
pub(crate) fn pad(value: impl Into<i64>, width: usize) -> String {
    let value = value.into();
    if value < 0 {
        format!("-{:0width$}", value.unsigned_abs())
    } else {
        format!("{value:0width$}")
    }
}

/// Last two digits of the four-digit padded year.
pub(crate) fn two_digit_year(year: i32) -> String {
    let padded = pad(year, 4);
    padded[padded.len() - 2..].to_owned()
}

/// Mask families of MySQL `GET_FORMAT()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormatKind {
    #[display(fmt = "DATE")]
    Date,
    #[display(fmt = "DATETIME")]
    DateTime,
    #[display(fmt = "TIME")]
    Time,
}

/// Regional conventions of MySQL `GET_FORMAT()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormatRegion {
    #[display(fmt = "USA")]
    Usa,
    #[display(fmt = "JIS")]
    Jis,
    #[display(fmt = "ISO")]
    Iso,
    #[display(fmt = "EUR")]
    Eur,
    #[display(fmt = "INTERNAL")]
    Internal,
}

/// Predefined mask, as MySQL `GET_FORMAT(kind, region)`.
pub const fn get_format(kind: FormatKind, region: FormatRegion) -> &'static str {
    use FormatKind::{Date, DateTime, Time};
    use FormatRegion::{Eur, Internal, Iso, Jis, Usa};

    match (kind, region) {
        (Date, Usa) => "%m.%d.%Y",
        (Date, Jis | Iso) => "%Y-%m-%d",
        (Date, Eur) => "%d.%m.%Y",
        (Date, Internal) => "%Y%m%d",
        (DateTime, Usa | Eur) => "%Y-%m-%d %H.%i.%s",
        (DateTime, Jis | Iso) => "%Y-%m-%d %H:%i:%s",
        (DateTime, Internal) => "%Y%m%d%H%i%s",
        (Time, Usa) => "%h:%i:%s %p",
        (Time, Jis | Iso) => "%H:%i:%s",
        (Time, Eur) => "%H.%i.%s",
        (Time, Internal) => "%H%i%s",
    }
}
