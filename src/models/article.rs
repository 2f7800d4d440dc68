// src/models/article.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    models::{Authored, NONE_AVAILABLE, TEASER_WORDS},
    utils::html::{demote_headings, sanitize, strip_tags, truncate_words},
};

/// A piece published in an issue.
///
/// Deserializing ignores any stored `cleaned_text` and re-sanitizes `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredArticle")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub subheading: Option<String>,

    /// Author IDs, in byline order.
    pub author_ids: Vec<i64>,

    /// Introductory paragraph, if any.
    pub description: Option<String>,

    /// Body as submitted.
    text: Option<String>,

    /// Sanitized copy of `text`, refreshed whenever `text` changes.
    cleaned_text: Option<String>,

    pub hits: i64,

    pub issue_number: u32,
    pub order_in_issue: u32,

    /// Path of the lead image, relative to the media root.
    pub image: Option<String>,
}

impl Article {
    pub fn from_request(id: i64, payload: NewArticle) -> Result<Self, AppError> {
        payload.validate()?;

        let mut article = Self {
            id,
            title: payload.title,
            subheading: payload.subheading,
            author_ids: payload.author_ids,
            description: payload.description,
            text: None,
            cleaned_text: None,
            hits: 0,
            issue_number: payload.issue_number,
            order_in_issue: payload.order_in_issue,
            image: payload.image,
        };
        article.set_text(payload.text);
        Ok(article)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn cleaned_text(&self) -> Option<&str> {
        self.cleaned_text.as_deref()
    }

    /// Replaces the body and regenerates its sanitized copy.
    /// An empty body keeps the previous cleaned text.
    pub fn set_text(&mut self, text: Option<String>) {
        if let Some(body) = text.as_deref().filter(|t| !t.is_empty()) {
            self.cleaned_text = Some(sanitize(body));
        }
        self.text = text;
    }

    pub fn mark_visited(&mut self) {
        self.hits += 1;
    }

    /// The description, else the first words of the body, else a placeholder.
    pub fn teaser(&self) -> String {
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            return description.to_string();
        }

        match self.cleaned_text.as_deref().filter(|t| !t.is_empty()) {
            Some(cleaned) => truncate_words(&strip_tags(cleaned), TEASER_WORDS),
            None => NONE_AVAILABLE.to_string(),
        }
    }

    pub fn demoted_text(&self) -> String {
        self.cleaned_text.as_deref().map(demote_headings).unwrap_or_default()
    }

    pub fn absolute_url(&self) -> String {
        format!("/issues/{}/{}/", self.issue_number, self.id)
    }
}

/// Wire form of an [`Article`]: everything except the derived `cleaned_text`.
#[derive(Deserialize)]
struct StoredArticle {
    id: i64,
    title: String,
    subheading: Option<String>,
    #[serde(default)]
    author_ids: Vec<i64>,
    description: Option<String>,
    text: Option<String>,
    #[serde(default)]
    hits: i64,
    issue_number: u32,
    #[serde(default)]
    order_in_issue: u32,
    image: Option<String>,
}

impl From<StoredArticle> for Article {
    fn from(stored: StoredArticle) -> Self {
        let mut article = Self {
            id: stored.id,
            title: stored.title,
            subheading: stored.subheading,
            author_ids: stored.author_ids,
            description: stored.description,
            text: None,
            cleaned_text: None,
            hits: stored.hits,
            issue_number: stored.issue_number,
            order_in_issue: stored.order_in_issue,
            image: stored.image,
        };
        article.set_text(stored.text);
        article
    }
}

impl Authored for Article {
    const KIND: &'static str = "Article";

    fn id(&self) -> i64 {
        self.id
    }

    fn author_ids(&self) -> &[i64] {
        &self.author_ids
    }
}

/// DTO for creating an article.
#[derive(Debug, Deserialize, Validate)]
pub struct NewArticle {
    #[validate(length(min = 1, max = 250, message = "Title length must be between 1 and 250 chars"))]
    pub title: String,

    #[validate(length(max = 250, message = "Subheading must be at most 250 chars"))]
    pub subheading: Option<String>,

    #[serde(default)]
    pub author_ids: Vec<i64>,

    pub description: Option<String>,

    pub text: Option<String>,

    pub issue_number: u32,

    #[serde(default)]
    pub order_in_issue: u32,

    #[validate(length(max = 100, message = "Image path must be at most 100 chars"))]
    pub image: Option<String>,
}
