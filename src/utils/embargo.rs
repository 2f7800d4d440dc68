// src/utils/embargo.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    config::{Config, DEFAULT_EMBARGO_MONTHS},
    error::AppError,
    utils::calendar::months_before,
};

/// Derived visibility of an issue on a given day. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueVisibility {
    /// Anonymous readers may see the issue.
    pub is_published: bool,
    /// Still inside the embargo window. Informational only (e.g. a "preview" badge);
    /// access is decided by `is_published` plus the viewer's role.
    pub is_embargoed: bool,
}

/// `true` when the issue is flagged published and its date has arrived.
pub fn is_published(published: bool, issue_date: NaiveDate, today: NaiveDate) -> bool {
    published && issue_date <= today
}

/// `true` while an issue is unpublished or younger than `embargo_months`.
///
/// Errors with `AppError::InvalidArgument` for a negative month count.
pub fn is_embargoed(
    published: bool,
    issue_date: NaiveDate,
    today: NaiveDate,
    embargo_months: i32,
) -> Result<bool, AppError> {
    let months = u32::try_from(embargo_months).map_err(|_| {
        AppError::InvalidArgument(format!(
            "embargo months must be >= 0, got {}",
            embargo_months
        ))
    })?;

    Ok(EmbargoPolicy::new(months).is_embargoed(published, issue_date, today))
}

/// Embargo period, validated once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbargoPolicy {
    months: u32,
}

impl Default for EmbargoPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EMBARGO_MONTHS)
    }
}

impl EmbargoPolicy {
    pub fn new(months: u32) -> Self {
        Self { months }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.embargo_months)
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// Issues dated after this day are still embargoed on `today`.
    /// `None` when the boundary lies before the earliest representable date.
    pub fn boundary(&self, today: NaiveDate) -> Option<NaiveDate> {
        months_before(today, self.months)
    }

    pub fn is_embargoed(&self, published: bool, issue_date: NaiveDate, today: NaiveDate) -> bool {
        if !is_published(published, issue_date, today) {
            return true;
        }

        match self.boundary(today) {
            Some(boundary) => boundary < issue_date,
            None => true,
        }
    }

    pub fn evaluate(&self, published: bool, issue_date: NaiveDate, today: NaiveDate) -> IssueVisibility {
        IssueVisibility {
            is_published: is_published(published, issue_date, today),
            is_embargoed: self.is_embargoed(published, issue_date, today),
        }
    }
}
