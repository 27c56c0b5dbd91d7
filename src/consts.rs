/// Length of an identity code: `DDMMYY` + marker + 3-digit individual number + check char
pub const CODE_LEN: usize = 11;

/// Byte offsets of the fields inside an identity code
pub(crate) const DAY_RANGE: std::ops::Range<usize> = 0..2;
pub(crate) const MONTH_RANGE: std::ops::Range<usize> = 2..4;
pub(crate) const YEAR_RANGE: std::ops::Range<usize> = 4..6;
pub(crate) const MARKER_INDEX: usize = 6;
pub(crate) const INDIVIDUAL_RANGE: std::ops::Range<usize> = 7..10;
pub(crate) const CHECK_INDEX: usize = 10;

/// Symbols used for the check character, indexed by `number % CHECK_MODULUS`.
/// G, I, O and Q are left out because they are easily confused with digits.
pub const CHECK_ALPHABET: [char; 31] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'H', 'J', 'K',
    'L', 'M', 'N', 'P', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
];

/// Modulus of the check character computation
pub const CHECK_MODULUS: u32 = 31;

/// Multiplier shifting `DDMMYY` left of the 3-digit individual number
pub(crate) const INDIVIDUAL_NUMBER_SPAN: u32 = 1000;

/// Earliest year a code can encode (`50+`)
pub const MIN_YEAR: u16 = 1850;
/// Latest year a code can encode (`29A`..=`29F`)
pub const MAX_YEAR: u16 = 2029;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Maximum valid day in any month
pub const MAX_DAY: u8 = 31;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Months per year, used when splitting a month count into years and months
pub(crate) const MONTHS_PER_YEAR: u32 = 12;

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
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Century offsets selected by the marker character
pub const CENTURY_1800: u16 = 1800;
pub const CENTURY_1900: u16 = 1900;
pub const CENTURY_2000: u16 = 2000;

/// Lowest two-digit year accepted after the `+` marker
pub(crate) const PLUS_MARKER_MIN_YY: u8 = 50;
/// Highest two-digit year accepted after an `A`..=`F` marker
pub(crate) const LETTER_2000_MARKER_MAX_YY: u8 = 29;
