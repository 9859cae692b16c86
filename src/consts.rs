/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

pub const DAYS_PER_WEEK: i64 = 7;
pub const SECONDS_PER_DAY: i64 = 86_400;

pub const MAX_HOUR: u8 = 23;
pub const MAX_MINUTE: u8 = 59;
pub const MAX_SECOND: u8 = 59;
pub const MAX_MILLISECOND: u16 = 999;

/// Largest accepted UTC offset, in minutes (±18:00)
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Escape character of the MySQL `DATE_FORMAT()` dialect
pub const MYSQL_ESCAPE: char = '%';
/// Escape character of the PHP `date()` dialect
pub const PHP_ESCAPE: char = '\\';

/// How many alias hops a token table may take before the token is treated as unknown
pub const MAX_ALIAS_DEPTH: usize = 4;

/// Smallest representable year; one above `i32::MIN` so the previous year always exists
pub const MIN_YEAR: i32 = i32::MIN + 1;
/// Largest representable year
pub const MAX_YEAR: i32 = i32::MAX;
