// src/models/mod.rs

pub mod article;
pub mod author;
pub mod book_review;
pub mod issue;

/// Teasers cut the body after this many words.
pub(crate) const TEASER_WORDS: usize = 50;

pub(crate) const NONE_AVAILABLE: &str = "None available.";

/// Content with a byline. Lets author lookups and caching work for any kind.
pub trait Authored {
    /// Distinguishes kinds whose IDs may overlap (used in cache keys).
    const KIND: &'static str;

    fn id(&self) -> i64;

    fn author_ids(&self) -> &[i64];
}
