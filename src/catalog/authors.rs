// src/catalog/authors.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    catalog::{Catalog, Viewer},
    config::Config,
    error::AppError,
    models::{Authored, article::Article, author::Author, book_review::BookReview},
    utils::{cache::TtlCache, presentation::format_authors},
};

/// Author lists keyed by (content kind, content id).
pub type AuthorCache = TtlCache<(&'static str, i64), Vec<Author>>;

impl AuthorCache {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.authors_cache_ttl)
    }
}

const DETAIL_ARTICLES: usize = 4;
const DETAIL_BOOK_REVIEWS: usize = 10;

#[derive(Debug, Serialize)]
pub struct AuthorSummary<'a> {
    pub author: &'a Author,
    pub num_articles: usize,
}

/// Author page: a preview of their work plus totals.
#[derive(Debug, Serialize)]
pub struct AuthorDetail<'a> {
    pub author: &'a Author,
    pub num_articles: usize,
    pub articles: Vec<&'a Article>,
    pub num_book_reviews: usize,
    pub book_reviews: Vec<&'a BookReview>,
}

impl Catalog {
    /// Every article by the author, published or not.
    pub fn num_articles(&self, author_id: i64) -> usize {
        self.articles
            .iter()
            .filter(|a| a.author_ids.contains(&author_id))
            .count()
    }

    /// Indexable authors with at least one article, most prolific first.
    pub fn list_authors(&self) -> Vec<AuthorSummary<'_>> {
        let mut summaries: Vec<AuthorSummary<'_>> = self
            .authors
            .iter()
            .filter(|author| author.indexable)
            .map(|author| AuthorSummary {
                author,
                num_articles: self.num_articles(author.id),
            })
            .filter(|summary| summary.num_articles > 0)
            .collect();

        summaries.sort_by(|a, b| {
            b.num_articles
                .cmp(&a.num_articles)
                .then_with(|| a.author.surname_forename().cmp(&b.author.surname_forename()))
        });
        summaries
    }

    pub fn author_detail(&self, id: i64, viewer: Viewer, today: NaiveDate) -> Result<AuthorDetail<'_>, AppError> {
        let author = self.indexable_author(id)?;

        let articles = self.articles_by(id, viewer, today);
        let book_reviews = self.book_reviews_by(id, viewer, today);

        Ok(AuthorDetail {
            author,
            num_articles: articles.len(),
            articles: articles.into_iter().take(DETAIL_ARTICLES).collect(),
            num_book_reviews: book_reviews.len(),
            book_reviews: book_reviews.into_iter().take(DETAIL_BOOK_REVIEWS).collect(),
        })
    }

    /// Published articles by an indexable author, oldest issue first.
    pub fn author_articles(&self, id: i64, today: NaiveDate) -> Result<Vec<&Article>, AppError> {
        self.indexable_author(id)?;
        Ok(self.articles_by(id, Viewer::Anonymous, today))
    }

    /// Published book reviews by an indexable author, oldest issue first.
    pub fn author_book_reviews(&self, id: i64, today: NaiveDate) -> Result<Vec<&BookReview>, AppError> {
        self.indexable_author(id)?;
        Ok(self.book_reviews_by(id, Viewer::Anonymous, today))
    }

    /// Resolves a byline, skipping IDs that no longer exist.
    pub fn authors_of<T: Authored>(&self, item: &T) -> Vec<Author> {
        item.author_ids()
            .iter()
            .filter_map(|id| self.author(*id))
            .cloned()
            .collect()
    }

    /// Like [`Catalog::authors_of`], but served from `cache` when possible.
    /// Empty bylines are not cached.
    pub fn cached_authors<T: Authored>(&self, cache: &AuthorCache, item: &T) -> Vec<Author> {
        let key = (T::KIND, item.id());
        if let Some(authors) = cache.get(&key) {
            return authors;
        }

        let authors = self.authors_of(item);
        tracing::debug!(kind = T::KIND, id = item.id(), found = authors.len(), "author cache miss");
        if !authors.is_empty() {
            cache.insert(key, authors.clone());
        }
        authors
    }

    /// Byline HTML such as `A, B and C`, with links for indexable authors.
    pub fn byline<T: Authored>(&self, cache: &AuthorCache, item: &T) -> String {
        format_authors(&self.cached_authors(cache, item))
    }

    fn indexable_author(&self, id: i64) -> Result<&Author, AppError> {
        self.author(id)
            .filter(|author| author.indexable)
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    fn articles_by(&self, author_id: i64, viewer: Viewer, today: NaiveDate) -> Vec<&Article> {
        let mut articles: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| a.author_ids.contains(&author_id))
            .filter(|a| viewer.is_staff() || self.issue_is_published(a.issue_number, today))
            .collect();
        articles.sort_by_key(|a| (a.issue_number, a.order_in_issue, a.id));
        articles
    }

    fn book_reviews_by(&self, author_id: i64, viewer: Viewer, today: NaiveDate) -> Vec<&BookReview> {
        let mut reviews: Vec<&BookReview> = self
            .book_reviews
            .iter()
            .filter(|r| r.author_ids.contains(&author_id))
            .filter(|r| viewer.is_staff() || self.issue_is_published(r.issue_number, today))
            .collect();
        reviews.sort_by_key(|r| (r.issue_number, r.order_in_issue, r.id));
        reviews
    }
}
