// src/models/issue.rs

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    utils::{
        calendar::first_of_month,
        embargo::{self, EmbargoPolicy, IssueVisibility},
    },
};

/// One numbered release of the magazine, tied to a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique, user-facing issue number.
    pub number: u32,

    /// Always the 1st of the issue's month; the day part is ignored on input.
    #[serde(deserialize_with = "deserialize_first_of_month")]
    issue_date: NaiveDate,

    /// Unset to prepare an issue before release.
    pub published: bool,
}

fn deserialize_first_of_month<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    NaiveDate::deserialize(deserializer).map(first_of_month)
}

impl Issue {
    pub fn new(number: u32, issue_date: NaiveDate, published: bool) -> Self {
        Self {
            number,
            issue_date: first_of_month(issue_date),
            published,
        }
    }

    pub fn from_request(payload: NewIssue) -> Result<Self, AppError> {
        payload.validate()?;
        Ok(Self::new(payload.number, payload.issue_date, payload.published))
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn set_issue_date(&mut self, date: NaiveDate) {
        self.issue_date = first_of_month(date);
    }

    /// e.g. "January 2010".
    pub fn month_year(&self) -> String {
        self.issue_date.format("%B %Y").to_string()
    }

    pub fn is_published(&self, today: NaiveDate) -> bool {
        embargo::is_published(self.published, self.issue_date, today)
    }

    pub fn is_embargoed(&self, today: NaiveDate, policy: &EmbargoPolicy) -> bool {
        policy.is_embargoed(self.published, self.issue_date, today)
    }

    pub fn visibility(&self, today: NaiveDate, policy: &EmbargoPolicy) -> IssueVisibility {
        policy.evaluate(self.published, self.issue_date, today)
    }

    pub fn absolute_url(&self) -> String {
        format!("/issues/{}/", self.number)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Issue {}", self.number)
    }
}

/// The newest issue anonymous readers can see, if any.
pub fn current_issue(issues: &[Issue], today: NaiveDate) -> Option<&Issue> {
    issues
        .iter()
        .filter(|issue| issue.is_published(today))
        .max_by_key(|issue| (issue.issue_date, issue.number))
}

fn default_true() -> bool {
    true
}

/// DTO for creating an issue.
#[derive(Debug, Deserialize, Validate)]
pub struct NewIssue {
    #[validate(range(min = 1, message = "Issue numbers start at 1"))]
    pub number: u32,

    /// Any day of the month; normalised to the 1st.
    pub issue_date: NaiveDate,

    #[serde(default = "default_true")]
    pub published: bool,
}
