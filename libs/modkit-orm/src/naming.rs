//! Structural type name → logical entity name.

use modkit_db::{EntityName, InvalidEntityName};
use thiserror::Error;

use crate::config::NamingConfig;

/// The entity reference cannot be mapped to a logical entity name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityNameError {
    #[error("entity type '{type_name}' is not recognized: {reason}")]
    Unrecognized {
        type_name: String,
        reason: &'static str,
    },

    #[error(transparent)]
    InvalidName(#[from] InvalidEntityName),
}

/// Maps a structural type name to the canonical logical entity name.
///
/// Implementations must be pure and deterministic.
pub trait EntityNameNormalizer: Send + Sync {
    /// # Errors
    /// Returns `EntityNameError` when `type_name` has no logical entity name.
    fn normalize(&self, type_name: &str) -> Result<EntityName, EntityNameError>;
}

/// Class-name convention: last path segment, configured suffix stripped,
/// camel-cased.
///
/// | Type name | Entity name |
/// |-----------|-------------|
/// | `app::model::PersonWorkspaceEntity` | `person` |
/// | `Company` | `company` |
/// | `URLBookmarkWorkspaceEntity` | `urlBookmark` |
#[derive(Clone, Debug)]
pub struct ClassNameNormalizer {
    class_suffix: String,
}

impl Default for ClassNameNormalizer {
    fn default() -> Self {
        Self::from_config(&NamingConfig::default())
    }
}

impl ClassNameNormalizer {
    #[must_use]
    pub fn new(class_suffix: impl Into<String>) -> Self {
        Self {
            class_suffix: class_suffix.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &NamingConfig) -> Self {
        Self::new(config.class_suffix.clone())
    }

    #[must_use]
    pub fn class_suffix(&self) -> &str {
        &self.class_suffix
    }
}

impl EntityNameNormalizer for ClassNameNormalizer {
    fn normalize(&self, type_name: &str) -> Result<EntityName, EntityNameError> {
        let unrecognized = |reason| EntityNameError::Unrecognized {
            type_name: type_name.to_owned(),
            reason,
        };

        if type_name.contains(['<', '>', '&', '[', '(', ' ']) {
            return Err(unrecognized("generic and compound types have no entity"));
        }

        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        let base = match short.strip_suffix(self.class_suffix.as_str()) {
            Some(stripped) if !self.class_suffix.is_empty() => stripped,
            _ => short,
        };
        if base.is_empty() {
            return Err(unrecognized("type name is empty once the class suffix is removed"));
        }

        Ok(EntityName::new(camel_case(base))?)
    }
}

/// Lower-cases the leading run of capitals: `Person` → `person`,
/// `URLBookmark` → `urlBookmark`, `API` → `api`.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    let mut in_leading_caps = true;

    while let Some(c) = chars.next() {
        in_leading_caps &= c.is_ascii_uppercase();
        let starts_next_word =
            !out.is_empty() && chars.peek().is_some_and(char::is_ascii_lowercase);
        if in_leading_caps && !starts_next_word {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
