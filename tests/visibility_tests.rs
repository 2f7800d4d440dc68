// tests/visibility_tests.rs

use chrono::NaiveDate;
use magazine::error::AppError;
use magazine::utils::calendar::first_of_month;
use magazine::{EmbargoPolicy, IssueVisibility, is_embargoed, is_published, subtract_months};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[test]
fn published_requires_flag_and_past_date() {
    let today = date(2024, 5, 17);

    assert!(is_published(true, date(2024, 5, 1), today));
    assert!(is_published(true, today, today));
    assert!(!is_published(false, date(2024, 5, 1), today));
    assert!(!is_published(true, date(2024, 6, 1), today));
}

#[test]
fn unpublished_is_always_embargoed() {
    let today = date(2024, 5, 17);

    assert!(is_embargoed(false, date(1999, 1, 1), today, 0).unwrap());
    assert!(is_embargoed(false, date(1999, 1, 1), today, 2).unwrap());
}

#[test]
fn future_issue_is_unpublished_and_embargoed() {
    let today = date(2024, 5, 17);
    let future = date(2024, 6, 1);

    assert!(!is_published(true, future, today));
    assert!(is_embargoed(true, future, today, 0).unwrap());
}

#[test]
fn zero_months_releases_every_published_issue() {
    let today = date(2024, 5, 17);

    assert!(!is_embargoed(true, date(2024, 5, 1), today, 0).unwrap());
    assert!(!is_embargoed(true, date(2010, 1, 1), today, 0).unwrap());
}

#[test]
fn embargo_window_follows_configured_months() {
    // Arrange
    let today = date(2024, 5, 17);
    let start_of_month = first_of_month(today);
    let months = 2;

    // Act & Assert: twenty days before this month normalises to last month
    let last_month = first_of_month(date(2024, 4, 11));
    assert!(is_embargoed(true, last_month, today, months).unwrap());

    let one_short = subtract_months(start_of_month, months - 1).unwrap();
    assert!(is_embargoed(true, one_short, today, months).unwrap());

    let old_enough = subtract_months(start_of_month, months).unwrap();
    assert!(!is_embargoed(true, old_enough, today, months).unwrap());
}

#[test]
fn boundary_day_is_not_embargoed() {
    // 2024-05-31 minus two months is 2024-03-31
    let today = date(2024, 5, 31);
    assert!(!is_embargoed(true, date(2024, 3, 31), today, 2).unwrap());
    assert!(is_embargoed(true, date(2024, 4, 1), today, 2).unwrap());
}

#[test]
fn negative_embargo_is_invalid_argument() {
    let result = is_embargoed(true, date(2024, 1, 1), date(2024, 5, 17), -2);
    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[test]
fn policy_defaults_to_two_months() {
    assert_eq!(EmbargoPolicy::default().months(), 2);
}

#[test]
fn policy_evaluate_reports_both_flags() {
    // Arrange
    let policy = EmbargoPolicy::new(2);
    let today = date(2024, 5, 17);

    // Act
    let fresh = policy.evaluate(true, date(2024, 5, 1), today);
    let old = policy.evaluate(true, date(2024, 1, 1), today);
    let hidden = policy.evaluate(false, date(2024, 1, 1), today);

    // Assert
    assert_eq!(fresh, IssueVisibility { is_published: true, is_embargoed: true });
    assert_eq!(old, IssueVisibility { is_published: true, is_embargoed: false });
    assert_eq!(hidden, IssueVisibility { is_published: false, is_embargoed: true });
}

#[test]
fn huge_embargo_keeps_everything_embargoed() {
    let policy = EmbargoPolicy::new(u32::MAX);
    let today = date(2024, 5, 17);

    assert_eq!(policy.boundary(today), None);
    assert!(policy.is_embargoed(true, date(1900, 1, 1), today));
}
