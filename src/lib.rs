mod age;
mod consts;
mod prelude;
mod types;

pub use age::{Age, AgeError, compute_age, compute_age_today};
pub use consts::*;
pub use types::{BirthDate, CenturyMarker, Day, Month, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, trace};

/// A Finnish personal identity code (henkilötunnus) that has passed validation.
///
/// The only way to obtain one is by parsing, so holding an `IdentityCode` means
/// the shape, birth date and check character were all verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(
    fmt = "{:02}{:02}{:02}{}{:03}{}",
    "birth_date.day()",
    "birth_date.month()",
    "birth_date.year() % 100",
    marker,
    individual,
    check
)]
pub struct IdentityCode {
    birth_date: BirthDate,
    marker:     CenturyMarker,
    individual: u16,
    check:      char,
}

/// Why a string is not a valid identity code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Wrong length, wrong character classes, or a field outside its pattern.
    #[error("Invalid identity code format: {0}")]
    ShapeMismatch(String),

    /// The fields are well formed but name a day the calendar does not have.
    #[error("Impossible birth date: {year}-{month:02}-{day:02}")]
    ImpossibleDate { year: u16, month: u8, day: u8 },

    /// The trailing character does not match the computed check character.
    #[error("Check character mismatch: expected '{expected}', found '{found}'")]
    CheckMismatch { expected: char, found: char },
}

impl ValidationError {
    pub const fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch(_))
    }

    pub const fn is_impossible_date(&self) -> bool {
        matches!(self, Self::ImpossibleDate { .. })
    }

    pub const fn is_check_mismatch(&self) -> bool {
        matches!(self, Self::CheckMismatch { .. })
    }
}

/// Returns `true` if `input` is a valid identity code.
///
/// Never panics; every kind of malformed input is simply `false`.
pub fn validate(input: &str) -> bool {
    check(input).is_ok()
}

/// Validates `input` and reports which stage rejected it.
///
/// # Errors
/// Returns the `ValidationError` variant of the first failed stage.
pub fn check(input: &str) -> Result<IdentityCode, ValidationError> {
    input.parse()
}

/// Looks up the check character for the 9-digit `DDMMYY` + individual number.
pub const fn check_char_for(number: u32) -> char {
    CHECK_ALPHABET[(number % CHECK_MODULUS) as usize]
}

impl IdentityCode {
    /// The birth date encoded in the first six characters and the century marker
    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub const fn century_marker(&self) -> CenturyMarker {
        self.marker
    }

    /// The 3-digit individual (rolling) number
    pub const fn individual_number(&self) -> u16 {
        self.individual
    }

    pub const fn check_char(&self) -> char {
        self.check
    }

    /// Numeric base of the check character: `DDMMYY` followed by the individual number
    fn check_base(birth_date: BirthDate, individual: u16) -> u32 {
        let date_digits = u32::from(birth_date.day()) * 10_000
            + u32::from(birth_date.month()) * 100
            + u32::from(birth_date.year() % 100);
        date_digits * INDIVIDUAL_NUMBER_SPAN + u32::from(individual)
    }

    /// Parses a fixed-width decimal field
    fn parse_digits(s: &str, range: Range<usize>) -> Result<u16, ValidationError> {
        let field = s
            .get(range.clone())
            .filter(|f| f.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| {
                ValidationError::ShapeMismatch(format!("expected digits at {}..{}", range.start, range.end))
            })?;
        field
            .parse::<u16>()
            .map_err(|_| ValidationError::ShapeMismatch(field.to_owned()))
    }

    /// Parses a two-digit field into `u8`
    fn parse_two_digits(s: &str, range: Range<usize>) -> Result<u8, ValidationError> {
        let value = Self::parse_digits(s, range)?;
        u8::try_from(value).map_err(|_| ValidationError::ShapeMismatch(value.to_string()))
    }

    fn char_at(s: &str, index: usize) -> char {
        char::from(s.as_bytes()[index])
    }

    fn parse_inner(s: &str) -> Result<Self, ValidationError> {
        if s.len() != CODE_LEN || !s.is_ascii() {
            return Err(ValidationError::ShapeMismatch(format!(
                "expected {CODE_LEN} ASCII characters, got {s:?}"
            )));
        }

        let day = Self::parse_two_digits(s, DAY_RANGE)?;
        if !(1..=MAX_DAY).contains(&day) {
            return Err(ValidationError::ShapeMismatch(format!("day {day:02} outside 01-{MAX_DAY}")));
        }
        let month = Month::new(Self::parse_two_digits(s, MONTH_RANGE)?)?;
        let yy = Self::parse_two_digits(s, YEAR_RANGE)?;
        let marker = CenturyMarker::try_from(Self::char_at(s, MARKER_INDEX))?;
        let year = marker.full_year(yy)?;
        let individual = Self::parse_digits(s, INDIVIDUAL_RANGE)?;

        let found = Self::char_at(s, CHECK_INDEX);
        if !(found.is_ascii_digit() || found.is_ascii_uppercase()) {
            return Err(ValidationError::ShapeMismatch(format!("invalid check character '{found}'")));
        }

        let day = Day::new(day, year, month)?;
        let birth_date = BirthDate::from_parts(year, month, day);

        let expected = check_char_for(Self::check_base(birth_date, individual));
        if found != expected {
            return Err(ValidationError::CheckMismatch { expected, found });
        }

        Ok(Self {
            birth_date,
            marker,
            individual,
            check: found,
        })
    }
}

impl FromStr for IdentityCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_inner(s) {
            Ok(code) => {
                trace!(birth_date = %code.birth_date, "identity code accepted");
                Ok(code)
            },
            Err(err) => {
                debug!(error = %err, "identity code rejected");
                Err(err)
            },
        }
    }
}

impl TryFrom<&str> for IdentityCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for IdentityCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IdentityCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
