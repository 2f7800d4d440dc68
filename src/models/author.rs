// src/models/author.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// A contributor to articles or book reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,

    pub forename: String,

    pub surname: Option<String>,

    /// Free-form biography.
    pub details: Option<String>,

    /// Whether the author gets a page of their own.
    /// Off for pseudo-authors such as "Anonymous".
    pub indexable: bool,
}

impl Author {
    pub fn from_request(id: i64, payload: NewAuthor) -> Result<Self, AppError> {
        payload.validate()?;

        Ok(Self {
            id,
            forename: payload.forename,
            surname: payload.surname.filter(|s| !s.is_empty()),
            details: payload.details,
            indexable: payload.indexable,
        })
    }

    /// "Forename Surname", or just the forename.
    pub fn display_name(&self) -> String {
        match &self.surname {
            Some(surname) => format!("{} {}", self.forename, surname),
            None => self.forename.clone(),
        }
    }

    /// "Surname, Forename", or just the forename. Used for sorted listings.
    pub fn surname_forename(&self) -> String {
        match &self.surname {
            Some(surname) => format!("{}, {}", surname, self.forename),
            None => self.forename.clone(),
        }
    }

    pub fn absolute_url(&self) -> String {
        format!("/authors/{}/", self.id)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

fn default_true() -> bool {
    true
}

/// DTO for creating an author.
#[derive(Debug, Deserialize, Validate)]
pub struct NewAuthor {
    #[validate(length(min = 1, max = 100, message = "Forename must be between 1 and 100 chars"))]
    pub forename: String,

    #[validate(length(max = 100, message = "Surname must be at most 100 chars"))]
    pub surname: Option<String>,

    pub details: Option<String>,

    #[serde(default = "default_true")]
    pub indexable: bool,
}
