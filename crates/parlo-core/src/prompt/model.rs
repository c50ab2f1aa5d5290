//! Prompt domain model.

use serde::{Deserialize, Serialize};

/// Lowest difficulty level a prompt may carry.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest difficulty level a prompt may carry.
pub const MAX_DIFFICULTY: u8 = 5;

/// A speaking-exercise definition with a difficulty rating.
///
/// Prompts are immutable from the client's perspective once created;
/// only an admin action creates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// Unique prompt identifier
    pub id: u64,
    /// Difficulty level, 1 (beginner) through 5 (advanced)
    pub difficulty_level: u8,
    /// Short exercise title
    pub title: String,
    /// Longer exercise description
    pub description: String,
}

impl Prompt {
    /// Whether `level` is a valid difficulty rating.
    pub fn is_valid_difficulty(level: u8) -> bool {
        (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level)
    }
}
