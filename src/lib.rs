// src/lib.rs

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the core operations for collaborators that only need these
pub use utils::calendar::subtract_months;
pub use utils::embargo::{EmbargoPolicy, IssueVisibility, is_embargoed, is_published};
pub use utils::html::sanitize;
