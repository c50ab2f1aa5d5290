//! Speaking prompts and the catalog filter.

pub mod filter;
pub mod model;

pub use filter::{DifficultyFilter, filter_prompts};
pub use model::Prompt;
