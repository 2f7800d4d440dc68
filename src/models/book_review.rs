// src/models/book_review.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    models::{Authored, NONE_AVAILABLE, TEASER_WORDS},
    utils::html::{demote_headings, sanitize, strip_tags, truncate_words},
};

/// A review of a book, published in an issue alongside its articles.
/// Like [`Article`](crate::models::article::Article), deserializing re-sanitizes `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredBookReview")]
pub struct BookReview {
    pub id: i64,
    pub title: String,

    /// Reviewer IDs, in byline order.
    pub author_ids: Vec<i64>,

    text: Option<String>,
    cleaned_text: Option<String>,

    pub issue_number: u32,
    pub order_in_issue: u32,

    // Bibliographic details of the reviewed book.
    pub book_author: Option<String>,
    pub publisher: Option<String>,
    pub publisher_location: Option<String>,
    pub publication_date: Option<String>,
    pub num_pages: Option<u32>,
    pub price: Option<String>,
    pub isbn: Option<String>,

    pub hits: i64,
}

impl BookReview {
    pub fn from_request(id: i64, payload: NewBookReview) -> Result<Self, AppError> {
        payload.validate()?;

        let mut review = Self {
            id,
            title: payload.title,
            author_ids: payload.author_ids,
            text: None,
            cleaned_text: None,
            issue_number: payload.issue_number,
            order_in_issue: payload.order_in_issue,
            book_author: payload.book_author,
            publisher: payload.publisher,
            publisher_location: payload.publisher_location,
            publication_date: payload.publication_date,
            num_pages: payload.num_pages,
            price: payload.price,
            isbn: payload.isbn,
            hits: 0,
        };
        review.set_text(payload.text);
        Ok(review)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn cleaned_text(&self) -> Option<&str> {
        self.cleaned_text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        if let Some(body) = text.as_deref().filter(|t| !t.is_empty()) {
            self.cleaned_text = Some(sanitize(body));
        }
        self.text = text;
    }

    pub fn mark_visited(&mut self) {
        self.hits += 1;
    }

    pub fn teaser(&self) -> String {
        match self.cleaned_text.as_deref().filter(|t| !t.is_empty()) {
            Some(cleaned) => truncate_words(&strip_tags(cleaned), TEASER_WORDS),
            None => NONE_AVAILABLE.to_string(),
        }
    }

    pub fn demoted_text(&self) -> String {
        self.cleaned_text.as_deref().map(demote_headings).unwrap_or_default()
    }

    pub fn absolute_url(&self) -> String {
        format!("/issues/{}/reviews/{}/", self.issue_number, self.id)
    }
}

impl fmt::Display for BookReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.book_author.as_deref().filter(|a| !a.is_empty()) {
            Some(book_author) => write!(f, "{} ({})", self.title, book_author),
            None => f.write_str(&self.title),
        }
    }
}

#[derive(Deserialize)]
struct StoredBookReview {
    id: i64,
    title: String,
    #[serde(default)]
    author_ids: Vec<i64>,
    text: Option<String>,
    issue_number: u32,
    #[serde(default)]
    order_in_issue: u32,
    book_author: Option<String>,
    publisher: Option<String>,
    publisher_location: Option<String>,
    publication_date: Option<String>,
    num_pages: Option<u32>,
    price: Option<String>,
    isbn: Option<String>,
    #[serde(default)]
    hits: i64,
}

impl From<StoredBookReview> for BookReview {
    fn from(stored: StoredBookReview) -> Self {
        let mut review = Self {
            id: stored.id,
            title: stored.title,
            author_ids: stored.author_ids,
            text: None,
            cleaned_text: None,
            issue_number: stored.issue_number,
            order_in_issue: stored.order_in_issue,
            book_author: stored.book_author,
            publisher: stored.publisher,
            publisher_location: stored.publisher_location,
            publication_date: stored.publication_date,
            num_pages: stored.num_pages,
            price: stored.price,
            isbn: stored.isbn,
            hits: stored.hits,
        };
        review.set_text(stored.text);
        review
    }
}

impl Authored for BookReview {
    const KIND: &'static str = "BookReview";

    fn id(&self) -> i64 {
        self.id
    }

    fn author_ids(&self) -> &[i64] {
        &self.author_ids
    }
}

/// DTO for creating a book review.
#[derive(Debug, Deserialize, Validate)]
pub struct NewBookReview {
    #[validate(length(min = 1, max = 250))]
    pub title: String,

    #[serde(default)]
    pub author_ids: Vec<i64>,

    pub text: Option<String>,

    pub issue_number: u32,

    #[serde(default)]
    pub order_in_issue: u32,

    #[validate(length(max = 60))]
    pub book_author: Option<String>,
    #[validate(length(max = 60))]
    pub publisher: Option<String>,
    #[validate(length(max = 60))]
    pub publisher_location: Option<String>,
    #[validate(length(max = 20))]
    pub publication_date: Option<String>,

    pub num_pages: Option<u32>,

    #[validate(length(max = 250))]
    pub price: Option<String>,
    #[validate(length(max = 20))]
    pub isbn: Option<String>,
}
