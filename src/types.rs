use crate::ValidationError;
use crate::consts::{
    CENTURY_1800, CENTURY_1900, CENTURY_2000, CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, LETTER_2000_MARKER_MAX_YY, MAX_MONTH,
    MAX_YEAR, MIN_YEAR, PLUS_MARKER_MIN_YY,
};
use crate::prelude::*;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::num::NonZeroU16;
use std::str::FromStr;

/// A year value guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1850..=2029),
/// the span an identity code can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's within `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ValidationError::ShapeMismatch` if the value is out of range.
    pub fn new(value: u16) -> Result<Self, ValidationError> {
        NonZeroU16::new(value)
            .filter(|_| (MIN_YEAR..=MAX_YEAR).contains(&value))
            .map(Self)
            .ok_or_else(|| ValidationError::ShapeMismatch(format!("year {value} outside {MIN_YEAR}-{MAX_YEAR}")))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ValidationError::ShapeMismatch` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::ShapeMismatch(format!("month {value:02} outside 01-{MAX_MONTH}"));
        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > MAX_MONTH {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `ValidationError::ImpossibleDate` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ValidationError> {
        let impossible = || ValidationError::ImpossibleDate {
            year:  year.get(),
            month: month.get(),
            day:   value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(impossible)?;

        if value > days_in_month(year.get(), month) {
            return Err(impossible());
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seventh character of an identity code, selecting the birth century.
///
/// `+` covers the 1800s, `-` and `U`..=`Y` the 1900s, `A`..=`F` the 2000s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CenturyMarker {
    Plus,
    Minus,
    U,
    V,
    W,
    X,
    Y,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl CenturyMarker {
    /// Looks up the marker for a character. Anything outside the fixed set is `None`.
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Self::Plus,
            '-' => Self::Minus,
            'U' => Self::U,
            'V' => Self::V,
            'W' => Self::W,
            'X' => Self::X,
            'Y' => Self::Y,
            'A' => Self::A,
            'B' => Self::B,
            'C' => Self::C,
            'D' => Self::D,
            'E' => Self::E,
            'F' => Self::F,
            _ => return None,
        })
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::U => 'U',
            Self::V => 'V',
            Self::W => 'W',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
        }
    }

    /// Century offset added to the two-digit year
    pub const fn century(self) -> u16 {
        match self {
            Self::Plus => CENTURY_1800,
            Self::Minus | Self::U | Self::V | Self::W | Self::X | Self::Y => CENTURY_1900,
            Self::A | Self::B | Self::C | Self::D | Self::E | Self::F => CENTURY_2000,
        }
    }

    /// Whether this marker may follow the given two-digit year.
    ///
    /// `+` is only issued for births in 1850..=1899 and the 2000s letters only
    /// for births up to 2029.
    pub const fn accepts_two_digit_year(self, yy: u8) -> bool {
        match self {
            Self::Plus => matches!(yy, PLUS_MARKER_MIN_YY..=99),
            Self::A | Self::B | Self::C | Self::D | Self::E | Self::F => yy <= LETTER_2000_MARKER_MAX_YY,
            Self::Minus | Self::U | Self::V | Self::W | Self::X | Self::Y => yy <= 99,
        }
    }

    /// Resolves a two-digit year into a full year under this marker
    pub fn full_year(self, yy: u8) -> Result<Year, ValidationError> {
        if !self.accepts_two_digit_year(yy) {
            return Err(ValidationError::ShapeMismatch(format!(
                "marker '{}' cannot follow year {yy:02}",
                self.as_char()
            )));
        }
        Year::new(self.century() + u16::from(yy))
    }
}

impl TryFrom<char> for CenturyMarker {
    type Error = ValidationError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_char(value)
            .ok_or_else(|| ValidationError::ShapeMismatch(format!("unknown century marker '{value}'")))
    }
}

impl fmt::Display for CenturyMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A birth date decoded from an identity code. Always a real calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct BirthDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl BirthDate {
    /// Creates a birth date from raw components
    ///
    /// # Errors
    /// Returns `ValidationError::ShapeMismatch` for an out-of-range year or month and
    /// `ValidationError::ImpossibleDate` for a day the month does not have.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ValidationError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a birth date from already validated components
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Converts to a chrono date for arithmetic
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(self.day()),
        )
    }
}

impl FromStr for BirthDate {
    type Err = ValidationError;

    /// Parses the ISO form produced by `Display` (`YYYY-MM-DD`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ValidationError::ShapeMismatch(format!("not a YYYY-MM-DD date: {s}")));
        };
        let invalid = || ValidationError::ShapeMismatch(format!("not a YYYY-MM-DD date: {s}"));
        let year = year.parse::<u16>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        let day = day.parse::<u8>().map_err(|_| invalid())?;
        Self::new(year, month, day)
    }
}

impl Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`. Taking a `Month` keeps the table lookup in bounds.
pub const fn days_in_month(year: u16, month: Month) -> u8 {
    let month = month.get();
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1850).is_ok());
        assert!(Year::new(1990).is_ok());
        assert!(Year::new(2029).is_ok());
    }

    #[test]
    fn test_year_new_out_of_range() {
        assert!(matches!(Year::new(1849), Err(ValidationError::ShapeMismatch(_))));
        assert!(matches!(Year::new(2030), Err(ValidationError::ShapeMismatch(_))));
        assert!(Year::new(0).is_err());
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ValidationError::ShapeMismatch(_))));
        assert!(matches!(Month::new(13), Err(ValidationError::ShapeMismatch(_))));
    }

    #[test]
    fn test_day_new() {
        let y2024 = Year::new(2024).unwrap();
        let y2023 = Year::new(2023).unwrap();
        let jan = Month::new(1).unwrap();
        let feb = Month::new(2).unwrap();
        let apr = Month::new(4).unwrap();

        assert!(Day::new(31, y2024, jan).is_ok());
        assert!(Day::new(28, y2023, feb).is_ok());
        assert!(Day::new(29, y2023, feb).is_err());
        assert!(Day::new(29, y2024, feb).is_ok());
        assert!(Day::new(30, y2024, feb).is_err());
        assert!(Day::new(30, y2024, apr).is_ok());
        assert!(Day::new(31, y2024, apr).is_err());
    }

    #[test]
    fn test_day_new_reports_impossible_date() {
        let year = Year::new(2023).unwrap();
        let month = Month::new(4).unwrap();
        assert_eq!(
            Day::new(31, year, month),
            Err(ValidationError::ImpossibleDate {
                year:  2023,
                month: 4,
                day:   31,
            })
        );
        assert!(matches!(
            Day::new(0, year, month),
            Err(ValidationError::ImpossibleDate { day: 0, .. })
        ));
    }

    #[test]
    fn test_century_marker_cases() {
        struct TestCase {
            marker:  char,
            century: u16,
        }

        let cases = [
            TestCase { marker: '+', century: 1800 },
            TestCase { marker: '-', century: 1900 },
            TestCase { marker: 'U', century: 1900 },
            TestCase { marker: 'V', century: 1900 },
            TestCase { marker: 'W', century: 1900 },
            TestCase { marker: 'X', century: 1900 },
            TestCase { marker: 'Y', century: 1900 },
            TestCase { marker: 'A', century: 2000 },
            TestCase { marker: 'B', century: 2000 },
            TestCase { marker: 'C', century: 2000 },
            TestCase { marker: 'D', century: 2000 },
            TestCase { marker: 'E', century: 2000 },
            TestCase { marker: 'F', century: 2000 },
        ];

        for case in &cases {
            let marker = CenturyMarker::from_char(case.marker)
                .unwrap_or_else(|| panic!("'{}' should be a marker", case.marker));
            assert_eq!(marker.century(), case.century, "marker '{}'", case.marker);
            assert_eq!(marker.as_char(), case.marker);
            assert_eq!(marker.to_string(), case.marker.to_string());
        }
    }

    #[test]
    fn test_century_marker_rejects_unknown() {
        for c in ['|', 'G', 'Z', 'a', '0', ' ', '*'] {
            assert!(CenturyMarker::from_char(c).is_none(), "'{c}' is not a marker");
            assert!(CenturyMarker::try_from(c).is_err());
        }
    }

    #[test]
    fn test_century_marker_year_constraints() {
        assert!(CenturyMarker::Plus.accepts_two_digit_year(50));
        assert!(CenturyMarker::Plus.accepts_two_digit_year(99));
        assert!(!CenturyMarker::Plus.accepts_two_digit_year(49));

        assert!(CenturyMarker::A.accepts_two_digit_year(0));
        assert!(CenturyMarker::F.accepts_two_digit_year(29));
        assert!(!CenturyMarker::A.accepts_two_digit_year(30));

        assert!(CenturyMarker::Minus.accepts_two_digit_year(0));
        assert!(CenturyMarker::Y.accepts_two_digit_year(99));
    }

    #[test]
    fn test_full_year() {
        assert_eq!(CenturyMarker::Plus.full_year(85).unwrap().get(), 1885);
        assert_eq!(CenturyMarker::Minus.full_year(90).unwrap().get(), 1990);
        assert_eq!(CenturyMarker::A.full_year(0).unwrap().get(), 2000);
        assert!(CenturyMarker::Plus.full_year(10).is_err());
        assert!(CenturyMarker::B.full_year(45).is_err());
    }

    #[test]
    fn test_birth_date_display_and_parse() {
        let date = BirthDate::new(2000, 2, 29).unwrap();
        assert_eq!(date.to_string(), "2000-02-29");
        assert_eq!("2000-02-29".parse::<BirthDate>().unwrap(), date);
        assert_eq!((date.year(), date.month(), date.day()), (2000, 2, 29));
    }

    #[test]
    fn test_birth_date_rejects_bad_input() {
        assert!("1900-02-29".parse::<BirthDate>().is_err());
        assert!("2000/02/29".parse::<BirthDate>().is_err());
        assert!("2000-02".parse::<BirthDate>().is_err());
        assert!("2000-xx-01".parse::<BirthDate>().is_err());
    }

    #[test]
    fn test_birth_date_ordering() {
        let earlier = BirthDate::new(1990, 6, 15).unwrap();
        let later = BirthDate::new(1990, 7, 1).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_birth_date_serde() {
        let date = BirthDate::new(1990, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""1990-06-15""#);

        let parsed: BirthDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let result: Result<BirthDate, _> = serde_json::from_str(r#""1990-06-31""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_naive_date() {
        let date = BirthDate::new(2000, 2, 29).unwrap();
        assert_eq!(date.to_naive_date(), NaiveDate::from_ymd_opt(2000, 2, 29));
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2020, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2024, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2021, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 1900, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 1800, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2100, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2000, is_leap: true, description: "divisible by 400" },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        let feb = Month::new(2).unwrap();
        assert_eq!(days_in_month(2023, feb), 28);
        assert_eq!(days_in_month(1900, feb), 28, "Century year not divisible by 400");
        assert_eq!(days_in_month(2024, feb), 29);
        assert_eq!(days_in_month(2000, feb), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_days_in_month_only_for_real_months() {
        // Out-of-range month numbers never reach the table lookup
        for value in 0..=u8::MAX {
            match Month::new(value) {
                Ok(month) => assert!((28..=31).contains(&days_in_month(2023, month))),
                Err(err) => {
                    assert!(value == 0 || value > MAX_MONTH, "month {value}");
                    assert!(err.is_shape_mismatch());
                },
            }
        }
    }

    #[test]
    fn test_all_months_have_valid_days() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, Month::new(month).unwrap()),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
    }
}
