//! Slug - Strongly typed pattern identifier.
//!
//! A slug is the file stem of a pattern file. It must be lowercase
//! kebab-case (`circuit-breaker`, `cqrs`, `saga-2pc`) and is unique
//! across the whole corpus.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a string is not a valid slug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Nothing left after trimming.
    #[error("slug cannot be empty")]
    Empty,
    /// Characters outside `[a-z0-9-]`, or misplaced dashes.
    #[error("'{0}' is not a lowercase kebab-case slug")]
    NotKebab(String),
}

/// Lowercase kebab-case pattern identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and wrap a slug.
    pub fn new(raw: impl Into<String>) -> Result<Self, SlugError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SlugError::Empty);
        }
        let well_formed = raw.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        });
        if !well_formed {
            return Err(SlugError::NotKebab(raw));
        }
        Ok(Self(raw))
    }

    /// Derive a slug from a human pattern name (`"Foo Bar"` -> `foo-bar`).
    pub fn from_name(name: &str) -> Result<Self, SlugError> {
        Self::new(slugify(name))
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the pattern (`<slug>.md`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.md", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(val: Slug) -> Self {
        val.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercase, keep ASCII alphanumerics, collapse every other run into `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}
