use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{BirthDate, IdentityCode, MONTHS_PER_YEAR, ValidationError, check, prelude::*};

/// Elapsed calendar time between a birth date and a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{years} years, {months} months, {days} days")]
pub struct Age {
    pub years:  u32,
    /// Always `0..=11`
    pub months: u32,
    /// Days since the last month-anniversary of the birth date
    pub days:   u32,
}

/// Error type for age computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    /// The input is not a valid identity code.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The reference date lies before the birth date.
    #[error("Birth date {birth} is after reference date {today}")]
    BirthInFuture { birth: BirthDate, today: NaiveDate },

    /// The birth date could not be mapped onto the calendar library.
    ///
    /// Every `BirthDate` lies in `MIN_YEAR..=MAX_YEAR` and names a real day, so this
    /// only appears if chrono cannot represent such a date.
    #[error("Birth date {0} cannot be represented as a calendar date")]
    UnrepresentableDate(BirthDate),
}

impl Age {
    pub const fn new(years: u32, months: u32, days: u32) -> Self {
        Self { years, months, days }
    }

    /// Computes the age on `today` of someone born on `birth`.
    ///
    /// Whole months are counted up to the last month-anniversary that is not after
    /// `today`; an anniversary falling on a day the target month lacks (the 31st,
    /// or February 29th) lands on that month's last day. The remaining days are the
    /// exact distance from that anniversary to `today`.
    ///
    /// # Errors
    /// Returns `AgeError::BirthInFuture` if `today` is before `birth`.
    pub fn between(birth: BirthDate, today: NaiveDate) -> Result<Self, AgeError> {
        let born = birth.to_naive_date().ok_or(AgeError::UnrepresentableDate(birth))?;
        if born > today {
            return Err(AgeError::BirthInFuture { birth, today });
        }

        let calendar_months = i64::from(today.year() - born.year()) * i64::from(MONTHS_PER_YEAR)
            + i64::from(today.month())
            - i64::from(born.month());
        let mut total_months =
            u32::try_from(calendar_months).map_err(|_| AgeError::BirthInFuture { birth, today })?;

        let anniversary_after = |months: u32| {
            born.checked_add_months(Months::new(months))
                .ok_or(AgeError::UnrepresentableDate(birth))
        };

        // The anniversary in today's month may still be ahead, clamped or not
        let mut anniversary = anniversary_after(total_months)?;
        if anniversary > today {
            total_months -= 1;
            anniversary = anniversary_after(total_months)?;
        }
        let days = u32::try_from((today - anniversary).num_days())
            .map_err(|_| AgeError::UnrepresentableDate(birth))?;

        Ok(Self {
            years: total_months / MONTHS_PER_YEAR,
            months: total_months % MONTHS_PER_YEAR,
            days,
        })
    }
}

impl IdentityCode {
    /// Age of the code's holder on the given date
    ///
    /// # Errors
    /// Returns `AgeError::BirthInFuture` if `today` is before the encoded birth date.
    pub fn age_on(&self, today: NaiveDate) -> Result<Age, AgeError> {
        Age::between(self.birth_date(), today)
    }
}

/// Validates `code` and computes its holder's age on `today`.
///
/// # Errors
/// Returns `AgeError::Invalid` for an invalid code and `AgeError::BirthInFuture`
/// if `today` is before the encoded birth date.
pub fn compute_age(code: &str, today: NaiveDate) -> Result<Age, AgeError> {
    let code = check(code)?;
    let age = code.age_on(today)?;
    debug!(birth_date = %code.birth_date(), %today, %age, "computed age");
    Ok(age)
}

/// Same as [`compute_age`] with the local wall-clock date as reference.
///
/// # Errors
/// See [`compute_age`].
pub fn compute_age_today(code: &str) -> Result<Age, AgeError> {
    compute_age(code, Local::now().date_naive())
}
