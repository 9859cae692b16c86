//! PHP `date()` dialect: single-letter tokens, `\` makes the next character literal.
//!
//! Characters that are not tokens are copied as they are, so separators need no
//! escaping. The predefined masks mirror the `DateTimeInterface` constants.

use crate::LocalDateTime;
use crate::calendar::{is_leap_year, month_days};
use crate::consts::PHP_ESCAPE;
use crate::mysql::{hour12, pad, two_digit_year};
use crate::names::{NameTable, ordinal_suffix};
use crate::scan::{self, Replacement, Token, Trigger, resolve_alias};
use crate::week::{WeekMode, year_week};

/// `2005-08-15T15:52:01+00:00`
pub const ATOM: &str = "Y-m-d\\TH:i:sP";
/// `2005-08-15T15:52:01+0000`
pub const ISO8601: &str = "Y-m-d\\TH:i:sO";
/// `Mon, 15 Aug 05 15:52:01 +0000`
pub const RFC822: &str = "D, d M y H:i:s O";
/// `Monday, 15-Aug-05 15:52:01 UTC`
pub const RFC850: &str = "l, d-M-y H:i:s T";
/// `Mon, 15 Aug 05 15:52:01 +0000`
pub const RFC1036: &str = "D, d M y H:i:s O";
/// `Mon, 15 Aug 2005 15:52:01 +0000`
pub const RFC1123: &str = "D, d M Y H:i:s O";
/// `Mon, 15 Aug 2005 15:52:01 +0000`
pub const RFC2822: &str = "D, d M Y H:i:s O";
/// `2005-08-15T15:52:01+00:00`
pub const RFC3339: &str = "Y-m-d\\TH:i:sP";
/// `2005-08-15T15:52:01.000+00:00`
pub const RFC3339_EXTENDED: &str = "Y-m-d\\TH:i:s.vP";
/// `Mon, 15 Aug 2005 15:52:01 +0000`
pub const RSS: &str = "D, d M Y H:i:s O";
/// `2005-08-15T15:52:01+00:00`
pub const W3C: &str = "Y-m-d\\TH:i:sP";

type Render = fn(&LocalDateTime, &NameTable) -> String;

/// Renders dates with a borrowed [`NameTable`].
#[derive(Debug, Clone, Copy)]
pub struct PhpFormatter<'a> {
    names: &'a NameTable,
}

impl<'a> PhpFormatter<'a> {
    pub const fn new(names: &'a NameTable) -> Self {
        Self { names }
    }

    /// Renders `date` through `mask`. Never fails.
    pub fn format(&self, date: &LocalDateTime, mask: &str) -> String {
        render_mask(date, self.names, mask)
    }

    /// Renders a single token character, `None` if it is not a token.
    pub fn render(&self, date: &LocalDateTime, token: char) -> Option<String> {
        resolve_alias(token, lookup).map(|render| render(date, self.names))
    }
}

impl Default for PhpFormatter<'static> {
    fn default() -> Self {
        Self::new(NameTable::english())
    }
}

/// Formats `date` with English names, as PHP `date(mask)`.
///
/// ```
/// use dafo::{LocalDateTime, php};
///
/// let d = LocalDateTime::new(2000, 1, 1)?.with_time(13, 14, 6, 52)?.with_offset(120)?;
/// assert_eq!(php::date_format(&d, php::RFC2822), "Sat, 01 Jan 2000 13:14:06 +0200");
/// assert_eq!(php::date_format(&d, "\\W\\e\\e\\k W"), "Week 52");
/// # Ok::<(), dafo::DateError>(())
/// ```
pub fn date_format(date: &LocalDateTime, mask: &str) -> String {
    PhpFormatter::default().format(date, mask)
}

fn render_mask(date: &LocalDateTime, names: &NameTable, mask: &str) -> String {
    scan::scan_with(mask, PHP_ESCAPE, Trigger::Unescaped, |mask: &str, cursor: usize| {
        let token = mask[cursor..].chars().next()?;
        resolve_alias(token, lookup).map(|render| Replacement::from(render(date, names)))
    })
}

fn lookup(token: char) -> Option<Token<Render>> {
    let render: Render = match token {
        // Day
        'd' => |d, _| pad(d.day(), 2),
        'D' => |d, names| names.weekday_short(d.weekday()).to_owned(),
        'j' => |d, _| d.day().to_string(),
        'l' => |d, names| names.weekday(d.weekday()).to_owned(),
        'N' => |d, _| d.weekday().number_from_monday().to_string(),
        'S' => |d, _| ordinal_suffix(u32::from(d.day())).to_owned(),
        'w' => |d, _| d.weekday().number_from_sunday().to_string(),
        'z' => |d, _| (d.day_of_year() - 1).to_string(),
        // Week
        'W' => |d, _| pad(year_week(d, WeekMode::ISO).week, 2),
        // Month
        'F' => |d, names| names.month(d.month_typed()).to_owned(),
        'm' => |d, _| pad(d.month(), 2),
        'M' => |d, names| names.month_short(d.month_typed()).to_owned(),
        'n' => |d, _| d.month().to_string(),
        't' => |d, _| month_days(d).to_string(),
        // Year
        'L' => |d, _| String::from(if is_leap_year(d) { "1" } else { "0" }),
        'o' => |d, _| year_week(d, WeekMode::ISO).year.to_string(),
        'Y' => |d, _| pad(d.year(), 4),
        'y' => |d, _| two_digit_year(d.year()),
        // Time
        'a' => |d, _| String::from(if d.hour() < 12 { "am" } else { "pm" }),
        'A' => |d, _| String::from(if d.hour() < 12 { "AM" } else { "PM" }),
        'g' => |d, _| hour12(d).to_string(),
        'G' => |d, _| d.hour().to_string(),
        'h' => |d, _| pad(hour12(d), 2),
        'H' => |d, _| pad(d.hour(), 2),
        'i' => |d, _| pad(d.minute(), 2),
        's' => |d, _| pad(d.second(), 2),
        'u' => |d, _| format!("{}000", pad(d.millisecond(), 3)),
        'v' => |d, _| pad(d.millisecond(), 3),
        // Timezone
        'O' => |d, _| utc_offset(d, ""),
        'P' => |d, _| utc_offset(d, ":"),
        'T' => |d, _| match d.utc_offset_minutes() {
            None => String::from("UTC"),
            Some(_) => utc_offset(d, ":"),
        },
        'Z' => |d, _| (i64::from(d.utc_offset_minutes().unwrap_or(0)) * 60).to_string(),
        // Full date/time
        'c' => |d, names| render_mask(d, names, ATOM),
        'r' => |d, names| render_mask(d, names, RFC2822),
        'U' => |d, _| d.unix_timestamp().to_string(),
        _ => return None,
    };
    Some(Token::Render(render))
}

/// `±hh<separator>mm`, east of UTC positive; no offset renders as UTC.
fn utc_offset(date: &LocalDateTime, separator: &str) -> String {
    let minutes = date.utc_offset_minutes().unwrap_or(0);
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.unsigned_abs();
    format!("{sign}{:02}{separator}{:02}", minutes / 60, minutes % 60)
}
