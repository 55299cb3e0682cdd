//! Quote record and the inputs used to create or change one.

use serde::{Deserialize, Serialize};

/// A stored quote.
///
/// Serialized field order is `id`, `text`, `author`, which is also the
/// on-disk layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub author: String,
}

/// Fields for a new quote. Both are trimmed before storing.
#[derive(Debug, Clone, Default)]
pub struct NewQuote {
    pub text: String,
    pub author: String,
}

impl NewQuote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

/// Partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotePatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl QuotePatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            author: None,
        }
    }

    pub fn author(author: impl Into<String>) -> Self {
        Self {
            text: None,
            author: Some(author.into()),
        }
    }
}
