// tests/calendar_tests.rs

use chrono::{Datelike, NaiveDate};
use magazine::error::AppError;
use magazine::subtract_months;
use magazine::utils::calendar::{days_in_month, first_of_month};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[test]
fn middle_of_year() {
    assert_eq!(subtract_months(date(2010, 4, 7), 2).unwrap(), date(2010, 2, 7));
}

#[test]
fn end_of_month_clamps_to_shorter_month() {
    // September only has 30 days
    assert_eq!(subtract_months(date(2010, 10, 31), 1).unwrap(), date(2010, 9, 30));
}

#[test]
fn beginning_of_year_rolls_back_a_year() {
    assert_eq!(subtract_months(date(2010, 1, 31), 1).unwrap(), date(2009, 12, 31));
}

#[test]
fn beginning_of_year_at_end_of_month() {
    assert_eq!(subtract_months(date(2010, 3, 31), 4).unwrap(), date(2009, 11, 30));
}

#[test]
fn more_than_twelve_months() {
    // 2008 is a leap year, 2007 is not
    assert_eq!(subtract_months(date(2010, 3, 31), 25).unwrap(), date(2008, 2, 29));
    assert_eq!(subtract_months(date(2010, 3, 31), 37).unwrap(), date(2007, 2, 28));
}

#[test]
fn whole_years_keep_the_month() {
    assert_eq!(subtract_months(date(2010, 6, 15), 24).unwrap(), date(2008, 6, 15));
    assert_eq!(subtract_months(date(2012, 2, 29), 12).unwrap(), date(2011, 2, 28));
}

#[test]
fn month_equal_to_remainder_wraps_to_december() {
    assert_eq!(subtract_months(date(2010, 5, 20), 5).unwrap(), date(2009, 12, 20));
}

#[test]
fn zero_months_is_identity() {
    let d = date(2010, 3, 31);
    assert_eq!(subtract_months(d, 0).unwrap(), d);
}

#[test]
fn negative_months_is_invalid_argument() {
    let result = subtract_months(date(2010, 3, 31), -1);
    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[test]
fn out_of_range_result_is_invalid_argument() {
    let result = subtract_months(NaiveDate::MIN, 1);
    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[test]
fn days_in_month_handles_leap_years() {
    assert_eq!(days_in_month(2008, 2), Some(29));
    assert_eq!(days_in_month(2007, 2), Some(28));
    assert_eq!(days_in_month(1900, 2), Some(28));
    assert_eq!(days_in_month(2000, 2), Some(29));
    assert_eq!(days_in_month(2010, 12), Some(31));
    assert_eq!(days_in_month(2010, 9), Some(30));
}

#[test]
fn first_of_month_resets_day() {
    assert_eq!(first_of_month(date(2010, 4, 30)), date(2010, 4, 1));
    assert_eq!(first_of_month(date(2010, 4, 1)), date(2010, 4, 1));
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        let last = days_in_month(y, m).expect("month in range");
        date(y, m, d.min(last))
    })
}

proptest! {
    #[test]
    fn zero_is_identity_for_all_dates(d in any_date()) {
        prop_assert_eq!(subtract_months(d, 0).unwrap(), d);
    }

    #[test]
    fn moves_exactly_n_calendar_months(d in any_date(), n in 0i32..600) {
        let result = subtract_months(d, n).unwrap();

        let before = d.year() * 12 + d.month0() as i32;
        let after = result.year() * 12 + result.month0() as i32;
        prop_assert_eq!(before - after, n);

        // Day is kept unless the target month is too short
        let last = days_in_month(result.year(), result.month()).unwrap();
        prop_assert_eq!(result.day(), d.day().min(last));
    }
}
