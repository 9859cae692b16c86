//! Day-of-year, days-in-month and leap-year queries on a [`LocalDateTime`].

use crate::LocalDateTime;
use crate::consts::{DECEMBER, JANUARY};
use crate::types::{self, civil_from_days, days_from_civil};

/// Day of the year, 1 for January 1st through 365/366.
///
/// Counted as whole days elapsed since the day before January 1st (day 0 of
/// January), so leap days are picked up from the calendar rather than a table.
pub fn day_of_year(date: &LocalDateTime) -> u16 {
    let day_zero = days_from_civil(date.year(), JANUARY, 0);
    (date.epoch_days() - day_zero) as u16
}

/// Number of days in the month of `date`: 28, 29, 30 or 31.
///
/// Resolved as day 0 of the following month, i.e. the last day of this one.
pub fn month_days(date: &LocalDateTime) -> u8 {
    let (year, month) = if date.month() == DECEMBER {
        (i64::from(date.year()) + 1, JANUARY)
    } else {
        (i64::from(date.year()), date.month() + 1)
    };
    let last_day = match i32::try_from(year) {
        Ok(year) => days_from_civil(year, month, 0),
        // December of the largest year: step back from the last day of the year instead
        Err(_) => days_from_civil(date.year(), DECEMBER, 31),
    };
    let (_, _, day) = civil_from_days(last_day);
    day
}

/// Gregorian leap year test on the year of `date`.
pub const fn is_leap_year(date: &LocalDateTime) -> bool {
    types::is_leap_year(date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(&datetime(2000, 1, 1, 13, 14, 6, 52)), 1);
        assert_eq!(day_of_year(&date(2000, 11, 1)), 306);
        assert_eq!(day_of_year(&date(2000, 12, 31)), 366);
        assert_eq!(day_of_year(&date(2001, 12, 31)), 365);
        assert_eq!(day_of_year(&date(2001, 3, 1)), 60);
        assert_eq!(day_of_year(&date(2000, 3, 1)), 61);
    }

    #[test]
    fn test_day_of_year_negative_years() {
        assert_eq!(day_of_year(&date(-1, 12, 31)), 365);
        assert_eq!(day_of_year(&date(0, 12, 31)), 366);
    }

    #[test]
    fn test_month_days() {
        assert_eq!(month_days(&date(2000, 1, 1)), 31);
        assert_eq!(month_days(&date(2000, 2, 1)), 29);
        assert_eq!(month_days(&date(2000, 4, 1)), 30);
        assert_eq!(month_days(&date(2001, 2, 1)), 28);
        assert_eq!(month_days(&date(1900, 2, 1)), 28);
        assert_eq!(month_days(&date(2001, 12, 31)), 31);
    }

    #[test]
    fn test_month_days_at_max_year() {
        assert_eq!(month_days(&date(i32::MAX, 12, 1)), 31);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(&date(2000, 1, 1)));
        assert!(!is_leap_year(&date(1900, 1, 1)));
        assert!(is_leap_year(&date(2004, 1, 1)));
        assert!(!is_leap_year(&date(2001, 1, 1)));
    }
}
