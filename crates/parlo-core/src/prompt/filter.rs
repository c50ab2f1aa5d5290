//! Prompt catalog filtering.
//!
//! Pure view-model logic for the prompt library: an exact difficulty
//! match combined with a case-insensitive free-text search over title
//! and description. Input order is preserved.

use super::model::Prompt;

/// Difficulty selection in the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    /// All levels pass.
    #[default]
    All,
    /// Only prompts with exactly this difficulty level pass.
    Level(u8),
}

impl DifficultyFilter {
    fn matches(self, prompt: &Prompt) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Level(level) => prompt.difficulty_level == level,
        }
    }
}

/// Filters `prompts` by difficulty and free text.
///
/// The text query matches case-insensitively against title OR
/// description; an empty query matches everything.
pub fn filter_prompts<'a>(
    prompts: &'a [Prompt],
    difficulty: DifficultyFilter,
    search: &str,
) -> Vec<&'a Prompt> {
    let query = search.trim().to_lowercase();
    prompts
        .iter()
        .filter(|prompt| {
            let matches_search = query.is_empty()
                || prompt.title.to_lowercase().contains(&query)
                || prompt.description.to_lowercase().contains(&query);
            difficulty.matches(prompt) && matches_search
        })
        .collect()
}
