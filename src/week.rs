//! Week numbering under the eight MySQL `WEEK()` modes.
//!
//! | Mode | First day of week | Range | Week 1 is the first week …    |
//! |------|-------------------|-------|-------------------------------|
//! | 0    | Sunday            | 0-53  | with a Sunday in this year    |
//! | 1    | Monday            | 0-53  | with 4 or more days this year |
//! | 2    | Sunday            | 1-53  | with a Sunday in this year    |
//! | 3    | Monday            | 1-53  | with 4 or more days this year |
//! | 4    | Sunday            | 0-53  | with 4 or more days this year |
//! | 5    | Monday            | 0-53  | with a Monday in this year    |
//! | 6    | Sunday            | 1-53  | with 4 or more days this year |
//! | 7    | Monday            | 1-53  | with a Monday in this year    |
//!
//! In the 1-53 modes a date that falls before week 1 belongs to the last week
//! of the previous year, so [`YearWeek::year`] can differ from the calendar year.

use crate::consts::{DAYS_PER_WEEK, JANUARY};
use crate::types::{is_leap_year, weekday_of};
use crate::{DateError, LocalDateTime, prelude::*};
use serde::{Deserialize, Serialize};

const MONDAY_FIRST: u8 = 0b001;
const YEAR_RANGE: u8 = 0b010;
const FIRST_WEEKDAY: u8 = 0b100;

/// One of the eight week numbering conventions, `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekMode(u8);

/// Which day opens a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FirstWeekday {
    Sunday,
    Monday,
}

/// How week 1 of a year is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum WeekOneRule {
    /// The first week containing the first weekday inside this year.
    #[display(fmt = "contains first weekday")]
    ContainsFirstWeekday,
    /// The first week with four or more days inside this year.
    #[display(fmt = "four or more days")]
    FourDays,
}

impl WeekMode {
    /// Mode 0: Sunday first, week 1 holds the first Sunday, numbered 0-53.
    pub const SUNDAY_0_53: Self = Self(0);
    /// Mode 1: Monday first, 4-day rule, numbered 0-53.
    pub const MONDAY_0_53: Self = Self(1);
    /// Mode 2: Sunday first, week 1 holds the first Sunday, numbered 1-53.
    pub const SUNDAY_1_53: Self = Self(2);
    /// Mode 3, ISO-8601 weeks: Monday first, 4-day rule, numbered 1-53.
    pub const ISO: Self = Self(3);

    /// # Errors
    /// Returns `DateError::InvalidWeekMode` for values above 7.
    pub const fn new(mode: u8) -> Result<Self, DateError> {
        if mode > 7 {
            return Err(DateError::InvalidWeekMode(mode));
        }
        Ok(Self(mode))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// All eight modes in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=7).map(Self)
    }

    pub const fn first_weekday(self) -> FirstWeekday {
        if self.0 & MONDAY_FIRST == 0 {
            FirstWeekday::Sunday
        } else {
            FirstWeekday::Monday
        }
    }

    pub const fn week_one_rule(self) -> WeekOneRule {
        // For Sunday-first modes the meaning of the weekday bit is inverted
        let normalized = if self.0 & MONDAY_FIRST == 0 {
            self.0 ^ FIRST_WEEKDAY
        } else {
            self.0
        };
        if normalized & FIRST_WEEKDAY == 0 {
            WeekOneRule::FourDays
        } else {
            WeekOneRule::ContainsFirstWeekday
        }
    }

    /// Week numbers run 1-53 (never 0) in this mode.
    pub const fn starts_at_one(self) -> bool {
        self.0 & YEAR_RANGE != 0
    }
}

impl TryFrom<u8> for WeekMode {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekMode> for u8 {
    fn from(mode: WeekMode) -> Self {
        mode.0
    }
}

/// A week number together with the year it is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-W{:02}", year, week)]
pub struct YearWeek {
    pub year: i32,
    /// 0-53, never 0 in the 1-53 modes
    pub week: u8,
}

/// First and last day (inclusive) of a numbered week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekRange {
    pub first: LocalDateTime,
    pub last:  LocalDateTime,
}

/// Arguments of [`week_range`] bundled for callers that receive them as a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WeekRangeRequest {
    pub year: i32,
    pub week: i32,
    #[serde(default)]
    pub mode: WeekMode,
}

impl WeekRangeRequest {
    /// # Errors
    /// See [`week_range`].
    pub fn resolve(&self) -> Result<WeekRange, DateError> {
        week_range(self.year, self.week, self.mode)
    }
}

/// Signed day offset from January 1st of `year` to the first day of week 1.
///
/// 0 means January 1st opens week 1; a negative value means week 1 starts in
/// the previous December.
pub fn week1_offset(year: i32, mode: WeekMode) -> i32 {
    let jan1 = i32::from(weekday_of(year, JANUARY, 1).number_from_sunday());

    match (mode.first_weekday(), mode.week_one_rule()) {
        (FirstWeekday::Sunday, WeekOneRule::ContainsFirstWeekday) => (7 - jan1) % 7,
        (FirstWeekday::Monday, WeekOneRule::ContainsFirstWeekday) => (8 - jan1) % 7,
        (FirstWeekday::Sunday, WeekOneRule::FourDays) => {
            if jan1 <= 3 {
                -jan1
            } else {
                7 - jan1
            }
        },
        (FirstWeekday::Monday, WeekOneRule::FourDays) => {
            if (1..=4).contains(&jan1) {
                1 - jan1
            } else {
                (8 - jan1) % 7
            }
        },
    }
}

/// Week number of a day of the year given the week-1 offset; days before week 1 are week 0.
fn week_number(day_of_year: i32, offset: i32) -> u8 {
    let days = day_of_year - offset;
    if days <= 0 {
        0
    } else {
        ((days + 6) / 7) as u8
    }
}

/// Resolves `date` to a `(year, week)` pair under `mode`.
pub fn year_week(date: &LocalDateTime, mode: WeekMode) -> YearWeek {
    let year = date.year();
    let day_of_year = i32::from(date.day_of_year());
    let offset = week1_offset(year, mode);

    if day_of_year <= offset && mode.starts_at_one() {
        // Counted as December 31st of the previous year, which always lies past that year's week 1
        let previous = year - 1;
        let last_day = if is_leap_year(previous) { 366 } else { 365 };
        let week = week_number(last_day, week1_offset(previous, mode));
        log::trace!("{date} precedes week 1 of {year} in mode {mode}, counted as {previous}-W{week:02}");
        return YearWeek {
            year: previous,
            week,
        };
    }

    YearWeek {
        year,
        week: week_number(day_of_year, offset),
    }
}

/// Week number of `date` under `mode`; the year it is counted in is dropped.
pub fn week_of_year(date: &LocalDateTime, mode: WeekMode) -> u8 {
    year_week(date, mode).week
}

/// First and last day of `week` in `year` under `mode`.
///
/// The week is not checked against the number of weeks in the year; an
/// out-of-range week yields days outside `year`.
///
/// # Errors
/// Returns `DateError::InvalidYear` if the range leaves the representable years.
pub fn week_range(year: i32, week: i32, mode: WeekMode) -> Result<WeekRange, DateError> {
    let jan1 = LocalDateTime::new(year, JANUARY, 1)?;
    let start = i64::from(week1_offset(year, mode)) + (i64::from(week) - 1) * DAYS_PER_WEEK;
    let first = jan1.add_days(start)?;
    let last = first.add_days(DAYS_PER_WEEK - 1)?;
    Ok(WeekRange { first, last })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, mode};

    #[test]
    fn test_mode_validation() {
        for m in 0..=7 {
            assert!(WeekMode::new(m).is_ok(), "mode {m} should be valid");
        }
        assert!(matches!(WeekMode::new(8), Err(DateError::InvalidWeekMode(8))));
        assert!(matches!(WeekMode::try_from(255), Err(DateError::InvalidWeekMode(255))));
        assert_eq!(WeekMode::default().get(), 0);
        assert_eq!(WeekMode::all().count(), 8);
        assert_eq!(WeekMode::SUNDAY_0_53, mode(0));
        assert_eq!(WeekMode::MONDAY_0_53, mode(1));
        assert_eq!(WeekMode::SUNDAY_1_53, mode(2));
        assert_eq!(WeekMode::ISO, mode(3));
    }

    #[test]
    fn test_mode_axes() {
        struct TestCase {
            mode:          u8,
            first_weekday: FirstWeekday,
            rule:          WeekOneRule,
            starts_at_one: bool,
        }

        let cases = [
            TestCase {
                mode:          0,
                first_weekday: FirstWeekday::Sunday,
                rule:          WeekOneRule::ContainsFirstWeekday,
                starts_at_one: false,
            },
            TestCase {
                mode:          1,
                first_weekday: FirstWeekday::Monday,
                rule:          WeekOneRule::FourDays,
                starts_at_one: false,
            },
            TestCase {
                mode:          2,
                first_weekday: FirstWeekday::Sunday,
                rule:          WeekOneRule::ContainsFirstWeekday,
                starts_at_one: true,
            },
            TestCase {
                mode:          3,
                first_weekday: FirstWeekday::Monday,
                rule:          WeekOneRule::FourDays,
                starts_at_one: true,
            },
            TestCase {
                mode:          4,
                first_weekday: FirstWeekday::Sunday,
                rule:          WeekOneRule::FourDays,
                starts_at_one: false,
            },
            TestCase {
                mode:          5,
                first_weekday: FirstWeekday::Monday,
                rule:          WeekOneRule::ContainsFirstWeekday,
                starts_at_one: false,
            },
            TestCase {
                mode:          6,
                first_weekday: FirstWeekday::Sunday,
                rule:          WeekOneRule::FourDays,
                starts_at_one: true,
            },
            TestCase {
                mode:          7,
                first_weekday: FirstWeekday::Monday,
                rule:          WeekOneRule::ContainsFirstWeekday,
                starts_at_one: true,
            },
        ];

        for case in &cases {
            let m = mode(case.mode);
            assert_eq!(m.first_weekday(), case.first_weekday, "mode {}", case.mode);
            assert_eq!(m.week_one_rule(), case.rule, "mode {}", case.mode);
            assert_eq!(m.starts_at_one(), case.starts_at_one, "mode {}", case.mode);
        }
    }

    #[test]
    fn test_week1_offset_by_jan1_weekday() {
        // 2017-01-01 Sunday, 2018-01-01 Monday, 2019-01-01 Tuesday, 2020-01-01 Wednesday,
        // 2015-01-01 Thursday, 2016-01-01 Friday, 2000-01-01 Saturday
        let years = [2017, 2018, 2019, 2020, 2015, 2016, 2000];
        let expected: [[i32; 7]; 4] = [
            // modes 0, 2
            [0, 6, 5, 4, 3, 2, 1],
            // modes 5, 7
            [1, 0, 6, 5, 4, 3, 2],
            // modes 4, 6
            [0, -1, -2, -3, 3, 2, 1],
            // modes 1, 3
            [1, 0, -1, -2, -3, 3, 2],
        ];
        let modes = [[0, 2], [5, 7], [4, 6], [1, 3]];

        for (row, pair) in modes.iter().enumerate() {
            for m in pair {
                for (col, year) in years.iter().enumerate() {
                    assert_eq!(
                        week1_offset(*year, mode(*m)),
                        expected[row][col],
                        "year {year} mode {m}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_year_week_2018_boundary() {
        let d = date(2018, 1, 1);
        assert_eq!(year_week(&d, mode(0)), YearWeek { year: 2018, week: 0 });
        assert_eq!(year_week(&d, mode(2)), YearWeek { year: 2017, week: 53 });
        assert_eq!(year_week(&d, mode(3)), YearWeek { year: 2018, week: 1 });
        assert_eq!(year_week(&d, mode(4)), YearWeek { year: 2018, week: 1 });
    }

    #[test]
    fn test_year_week_2000_new_year() {
        assert_eq!(year_week(&date(2000, 1, 1), mode(2)), YearWeek { year: 1999, week: 52 });
        assert_eq!(year_week(&date(2000, 1, 2), mode(2)), YearWeek { year: 2000, week: 1 });
        assert_eq!(year_week(&date(2000, 1, 2), mode(3)), YearWeek { year: 1999, week: 52 });
        assert_eq!(year_week(&date(2000, 1, 3), mode(3)), YearWeek { year: 2000, week: 1 });
    }

    #[test]
    fn test_week_of_year() {
        assert_eq!(week_of_year(&date(2000, 1, 1), mode(0)), 0);
        assert_eq!(week_of_year(&date(2000, 1, 2), mode(0)), 1);
        assert_eq!(week_of_year(&date(2000, 1, 2), mode(1)), 0);
        assert_eq!(week_of_year(&date(2000, 1, 3), mode(1)), 1);
    }

    #[test]
    fn test_year_week_display() {
        assert_eq!(YearWeek { year: 2017, week: 3 }.to_string(), "2017-W03");
    }

    #[test]
    fn test_week_range() {
        let range = week_range(2018, 1, mode(0)).unwrap();
        assert_eq!((range.first.month(), range.first.day()), (1, 7));
        assert_eq!((range.last.month(), range.last.day()), (1, 13));

        // Week 1 of 2020 (mode 3) opens on Monday 2019-12-30
        let range = week_range(2020, 1, mode(3)).unwrap();
        assert_eq!(range.first, date(2019, 12, 30));
        assert_eq!(range.last, date(2020, 1, 5));
    }

    #[test]
    fn test_week_range_out_of_year() {
        let range = week_range(2018, 60, mode(0)).unwrap();
        assert_eq!(range.first.year(), 2019);
        let range = week_range(2018, -1, mode(0)).unwrap();
        assert_eq!(range.first, date(2017, 12, 24));
    }

    #[test]
    fn test_week_range_request_defaults_mode_zero() {
        let request: WeekRangeRequest = serde_json::from_str(r#"{"year":2018,"week":1}"#).unwrap();
        assert_eq!(request.mode, WeekMode::default());
        assert_eq!(request.resolve().unwrap().first, date(2018, 1, 7));
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&mode(3)).unwrap(), "3");
        assert_eq!(serde_json::from_str::<WeekMode>("7").unwrap(), mode(7));
        assert!(serde_json::from_str::<WeekMode>("8").is_err());
    }
}
