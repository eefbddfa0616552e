use std::fmt;

use crate::InvalidEntityName;

/// Canonical logical entity name recognized by the storage layer.
///
/// A valid name is non-empty and consists of ASCII letters, digits and underscores.
/// Casing is preserved as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityName(String);

impl EntityName {
    /// Validate and wrap a logical entity name.
    ///
    /// # Errors
    /// Returns `InvalidEntityName` if the name is empty or contains characters other
    /// than ASCII alphanumerics and `_`.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidEntityName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidEntityName::Empty);
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(InvalidEntityName::InvalidCharacters(name));
        }
        Ok(Self(name))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityName {
    type Error = InvalidEntityName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EntityName {
    type Error = InvalidEntityName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityName> for String {
    fn from(value: EntityName) -> Self {
        value.0
    }
}
