use crate::{LocalDateTime, WeekMode};

pub fn date(year: i32, month: u8, day: u8) -> LocalDateTime {
    LocalDateTime::new(year, month, day).expect("failed to construct test date")
}

pub fn datetime(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
) -> LocalDateTime {
    date(year, month, day)
        .with_time(hour, minute, second, millisecond)
        .expect("failed to construct test time")
}

pub fn mode(value: u8) -> WeekMode {
    WeekMode::new(value).expect("failed to construct test week mode")
}

/// Sat 2000-01-01 13:14:06.052
pub fn d1() -> LocalDateTime {
    datetime(2000, 1, 1, 13, 14, 6, 52)
}

/// Wed 2000-11-01 00:00:00.000
pub fn d2() -> LocalDateTime {
    date(2000, 11, 1)
}
