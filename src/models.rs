//! Frontend Models
//!
//! Records persisted in localStorage.

use serde::{Deserialize, Serialize};

/// One to-do entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Millisecond timestamp at creation, bumped to stay unique
    pub id: u64,
    /// Trimmed, never empty
    pub text: String,
    pub completed: bool,
    /// ISO-8601 creation time
    pub created_at: String,
}

impl Item {
    pub fn new(id: u64, text: &str, created_at: String) -> Self {
        Self {
            id,
            text: text.to_string(),
            completed: false,
            created_at,
        }
    }
}
