use dafo::{LocalDateTime, WeekMode, days_in_month, parse_with_base, php, week1_offset, year_week};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = LocalDateTime> {
    (0i32..=9999, 1u8..=12, 1u8..=31).prop_map(|(year, month, day)| {
        let day = day.min(days_in_month(year, month));
        LocalDateTime::new(year, month, day).unwrap()
    })
}

proptest! {
    #[test]
    fn week1_offset_stays_within_a_week(year in -100_000i32..100_000, mode in 0u8..=7) {
        let offset = week1_offset(year, WeekMode::new(mode).unwrap());
        prop_assert!((-3..=6).contains(&offset), "offset {offset}");
    }

    #[test]
    fn week_number_in_mode_range(date in any_date(), mode in 0u8..=7) {
        let mode = WeekMode::new(mode).unwrap();
        let yw = year_week(&date, mode);
        prop_assert!(yw.week <= 53);
        if mode.starts_at_one() {
            prop_assert!(yw.week >= 1);
            prop_assert!(yw.year == date.year() || yw.year == date.year() - 1);
        } else {
            prop_assert_eq!(yw.year, date.year());
        }
    }

    #[test]
    fn date_round_trip(date in any_date()) {
        let text = php::date_format(&date, "Y-m-d");
        let base = LocalDateTime::new(2001, 1, 1).unwrap();
        let parsed = parse_with_base(&text, "Y-m-d", base).unwrap();
        prop_assert_eq!((parsed.year(), parsed.month(), parsed.day()), (date.year(), date.month(), date.day()));
    }

    #[test]
    fn time_round_trip(hour in 0u8..24, minute in 0u8..60, second in 0u8..60) {
        let base = LocalDateTime::new(2001, 1, 1).unwrap();
        let date = base.with_time(hour, minute, second, 0).unwrap();
        let text = php::date_format(&date, "His");
        prop_assert_eq!(parse_with_base(&text, "His", base), Some(date));
    }

    #[test]
    fn weekday_advances_daily(date in any_date(), days in -1000i64..1000) {
        let moved = date.add_days(days).unwrap();
        let expected = (i64::from(date.weekday().number_from_sunday()) + days).rem_euclid(7);
        prop_assert_eq!(i64::from(moved.weekday().number_from_sunday()), expected);
    }
}
