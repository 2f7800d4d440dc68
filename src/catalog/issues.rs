// src/catalog/issues.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    catalog::{Catalog, Viewer},
    error::AppError,
    models::{article::Article, book_review::BookReview, issue::Issue},
    utils::embargo::IssueVisibility,
};

/// Row of the issue archive.
#[derive(Debug, Serialize)]
pub struct IssueSummary<'a> {
    pub issue: &'a Issue,
    pub visibility: IssueVisibility,
    pub num_articles: usize,
}

/// An issue with its articles and book reviews, in running order.
#[derive(Debug, Serialize)]
pub struct IssueContents<'a> {
    pub issue: &'a Issue,
    pub visibility: IssueVisibility,
    pub articles: Vec<&'a Article>,
    pub book_reviews: Vec<&'a BookReview>,
}

impl Catalog {
    /// Issues visible to `viewer`, newest first.
    pub fn list_issues(&self, viewer: Viewer, today: NaiveDate) -> Vec<IssueSummary<'_>> {
        let mut issues: Vec<&Issue> = self
            .issues
            .iter()
            .filter(|issue| self.can_view(issue, viewer, today))
            .collect();
        issues.sort_by(|a, b| b.issue_date().cmp(&a.issue_date()).then(b.number.cmp(&a.number)));

        issues
            .into_iter()
            .map(|issue| IssueSummary {
                issue,
                visibility: issue.visibility(today, &self.policy),
                num_articles: self.articles.iter().filter(|a| a.issue_number == issue.number).count(),
            })
            .collect()
    }

    /// The newest published issue, whoever is asking.
    pub fn current_issue(&self, today: NaiveDate) -> Option<&Issue> {
        crate::models::issue::current_issue(&self.issues, today)
    }

    /// Front page: the current issue and everything in it.
    pub fn current_issue_contents(&self, today: NaiveDate) -> Option<IssueContents<'_>> {
        self.current_issue(today).map(|issue| self.contents_of(issue, today))
    }

    pub fn issue_detail(&self, number: u32, viewer: Viewer, today: NaiveDate) -> Result<IssueContents<'_>, AppError> {
        let issue = self
            .issue(number)
            .filter(|issue| self.can_view(issue, viewer, today))
            .ok_or_else(|| AppError::NotFound(format!("Issue {} not found", number)))?;

        Ok(self.contents_of(issue, today))
    }

    /// Looks up an article of issue `number` and counts the visit.
    pub fn article_detail(
        &mut self,
        number: u32,
        id: i64,
        viewer: Viewer,
        today: NaiveDate,
    ) -> Result<&Article, AppError> {
        self.check_issue_access(number, viewer, today)?;

        let article = self
            .articles
            .iter_mut()
            .find(|a| a.issue_number == number && a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;

        article.mark_visited();
        tracing::debug!(article = id, hits = article.hits, "article visited");
        Ok(article)
    }

    /// Looks up a book review of issue `number` and counts the visit.
    pub fn book_review_detail(
        &mut self,
        number: u32,
        id: i64,
        viewer: Viewer,
        today: NaiveDate,
    ) -> Result<&BookReview, AppError> {
        self.check_issue_access(number, viewer, today)?;

        let review = self
            .book_reviews
            .iter_mut()
            .find(|r| r.issue_number == number && r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book review {} not found", id)))?;

        review.mark_visited();
        tracing::debug!(book_review = id, hits = review.hits, "book review visited");
        Ok(review)
    }

    /// Hidden issues look exactly like missing ones.
    fn check_issue_access(&self, number: u32, viewer: Viewer, today: NaiveDate) -> Result<(), AppError> {
        match self.issue(number) {
            Some(issue) if self.can_view(issue, viewer, today) => Ok(()),
            _ => Err(AppError::NotFound(format!("Issue {} not found", number))),
        }
    }

    fn contents_of<'a>(&'a self, issue: &'a Issue, today: NaiveDate) -> IssueContents<'a> {
        let mut articles: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| a.issue_number == issue.number)
            .collect();
        articles.sort_by_key(|a| (a.order_in_issue, a.id));

        let mut book_reviews: Vec<&BookReview> = self
            .book_reviews
            .iter()
            .filter(|r| r.issue_number == issue.number)
            .collect();
        book_reviews.sort_by_key(|r| (r.order_in_issue, r.id));

        IssueContents {
            issue,
            visibility: issue.visibility(today, &self.policy),
            articles,
            book_reviews,
        }
    }
}
