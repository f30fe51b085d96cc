//! Client records supplied by the caller.

use serde::{Deserialize, Serialize};

/// A known client from the caller's roster.
///
/// Only the name fields are read by intent parsing; the rest is carried
/// through untouched when a draft is seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Opaque identifier from the backing store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Postal address as a single string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Client {
    /// Create a client with the given first and last names.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Default::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Lowercased first name, empty when missing.
    pub fn first_name_lower(&self) -> String {
        self.first_name.as_deref().unwrap_or("").to_lowercase()
    }

    /// Lowercased last name, empty when missing.
    pub fn last_name_lower(&self) -> String {
        self.last_name.as_deref().unwrap_or("").to_lowercase()
    }

    /// Lowercased "first last", skipping missing or empty parts.
    pub fn full_name_lower(&self) -> String {
        self.display_name().to_lowercase()
    }

    /// "First Last" as written, skipping missing or empty parts.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
