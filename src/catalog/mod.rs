// src/catalog/mod.rs

//! Read-side access rules over already-loaded magazine records.
//!
//! Anonymous viewers only ever see published issues and the articles and
//! reviews inside them; staff also see unpublished issues. Embargo status is
//! reported alongside but never used to hide anything.

pub mod authors;
pub mod issues;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    config::Config,
    error::AppError,
    models::{article::Article, author::Author, book_review::BookReview, issue::Issue},
    utils::embargo::EmbargoPolicy,
};

/// Who is asking. Staff may preview unpublished issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewer {
    Anonymous,
    Staff,
}

impl Viewer {
    pub fn is_staff(self) -> bool {
        matches!(self, Viewer::Staff)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    issues: Vec<Issue>,
    articles: Vec<Article>,
    book_reviews: Vec<BookReview>,
    authors: Vec<Author>,
    policy: EmbargoPolicy,
}

impl Catalog {
    pub fn new(policy: EmbargoPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(EmbargoPolicy::from_config(config))
    }

    pub fn policy(&self) -> &EmbargoPolicy {
        &self.policy
    }

    pub fn add_issue(&mut self, issue: Issue) -> Result<(), AppError> {
        if self.issue(issue.number).is_some() {
            return Err(AppError::Conflict(format!("{} already exists", issue)));
        }
        tracing::debug!(number = issue.number, date = %issue.issue_date(), "issue added");
        self.issues.push(issue);
        Ok(())
    }

    pub fn add_author(&mut self, author: Author) -> Result<(), AppError> {
        if self.author(author.id).is_some() {
            return Err(AppError::Conflict(format!("Author {} already exists", author.id)));
        }
        self.authors.push(author);
        Ok(())
    }

    pub fn add_article(&mut self, article: Article) -> Result<(), AppError> {
        self.check_references(article.issue_number, &article.author_ids)?;
        if self.articles.iter().any(|a| a.id == article.id) {
            return Err(AppError::Conflict(format!("Article {} already exists", article.id)));
        }
        self.articles.push(article);
        Ok(())
    }

    pub fn add_book_review(&mut self, review: BookReview) -> Result<(), AppError> {
        self.check_references(review.issue_number, &review.author_ids)?;
        if self.book_reviews.iter().any(|r| r.id == review.id) {
            return Err(AppError::Conflict(format!("Book review {} already exists", review.id)));
        }
        self.book_reviews.push(review);
        Ok(())
    }

    fn check_references(&self, issue_number: u32, author_ids: &[i64]) -> Result<(), AppError> {
        if self.issue(issue_number).is_none() {
            return Err(AppError::BadRequest(format!("Issue {} does not exist", issue_number)));
        }
        if let Some(missing) = author_ids.iter().find(|id| self.author(**id).is_none()) {
            return Err(AppError::BadRequest(format!("Author {} does not exist", missing)));
        }
        Ok(())
    }

    pub fn issue(&self, number: u32) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.number == number)
    }

    pub fn author(&self, id: i64) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    /// Whether `viewer` may see `issue` and its contents on `today`.
    pub fn can_view(&self, issue: &Issue, viewer: Viewer, today: NaiveDate) -> bool {
        viewer.is_staff() || issue.is_published(today)
    }

    fn issue_is_published(&self, number: u32, today: NaiveDate) -> bool {
        self.issue(number).is_some_and(|issue| issue.is_published(today))
    }
}
