// src/utils/calendar.rs

use chrono::{Datelike, NaiveDate};

use crate::error::AppError;

/// Returns the date `months` calendar months before `date`.
///
/// The day of month is kept when it exists in the target month and clamped to
/// that month's last day otherwise (Oct 31 minus one month is Sep 30, and
/// February honours leap years).
///
/// Errors with `AppError::InvalidArgument` when `months` is negative or the
/// result falls outside the range `chrono` can represent.
pub fn subtract_months(date: NaiveDate, months: i32) -> Result<NaiveDate, AppError> {
    let months = u32::try_from(months).map_err(|_| {
        AppError::InvalidArgument(format!("month count must be >= 0, got {}", months))
    })?;

    months_before(date, months).ok_or_else(|| {
        AppError::InvalidArgument(format!("{} minus {} months is out of range", date, months))
    })
}

/// Unsigned core of [`subtract_months`]. `None` only when the year underflows.
pub(crate) fn months_before(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let years = i32::try_from(months / 12).ok()?;
    let rem = months % 12;

    let (year, month) = if date.month() <= rem {
        (date.year().checked_sub(years)?.checked_sub(1)?, date.month() + 12 - rem)
    } else {
        (date.year().checked_sub(years)?, date.month() - rem)
    };

    NaiveDate::from_ymd_opt(year, month, date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?))
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// Moves a date back to the 1st of its month. Issue dates are stored this way.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
