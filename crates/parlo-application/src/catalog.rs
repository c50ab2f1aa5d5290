//! Prompt catalog use case.
//!
//! Cache-first reads over the prompt library plus the admin-only
//! creation path. Filtering itself is the pure view-model function in
//! `parlo_core::prompt::filter`.

use crate::cache::{CacheKey, QueryCache};
use crate::role::RoleResolver;
use parlo_core::backend::SpeakingBackend;
use parlo_core::error::{ParloError, Result};
use parlo_core::prompt::{DifficultyFilter, Prompt, filter_prompts};
use parlo_core::user::{Identity, UserRole};
use std::sync::Arc;

pub struct CatalogUseCase {
    backend: Arc<dyn SpeakingBackend>,
    cache: Arc<QueryCache>,
    roles: Arc<RoleResolver>,
}

impl CatalogUseCase {
    pub fn new(
        backend: Arc<dyn SpeakingBackend>,
        cache: Arc<QueryCache>,
        roles: Arc<RoleResolver>,
    ) -> Self {
        Self {
            backend,
            cache,
            roles,
        }
    }

    /// Returns the full catalog, cache-first.
    pub async fn prompts(&self) -> Result<Vec<Prompt>> {
        if let Some(prompts) = self.cache.prompts().await {
            return Ok(prompts);
        }
        let prompts = self.backend.get_all_prompts().await?;
        self.cache.set_prompts(prompts.clone()).await;
        Ok(prompts)
    }

    /// Returns the catalog filtered by difficulty and free text.
    pub async fn filtered_prompts(
        &self,
        difficulty: DifficultyFilter,
        search: &str,
    ) -> Result<Vec<Prompt>> {
        let prompts = self.prompts().await?;
        Ok(filter_prompts(&prompts, difficulty, search)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Returns one prompt; absence is the dedicated not-found outcome.
    pub async fn prompt(&self, prompt_id: u64) -> Result<Prompt> {
        if let Some(prompt) = self.cache.prompt(prompt_id).await {
            return Ok(prompt);
        }
        let Some(prompt) = self.backend.get_prompt(prompt_id).await? else {
            return Err(ParloError::not_found("prompt", prompt_id));
        };
        self.cache.set_prompt(prompt.clone()).await;
        Ok(prompt)
    }

    /// Creates a prompt. Admin only; also validated server-side.
    pub async fn create_prompt(
        &self,
        caller: Option<&Identity>,
        title: &str,
        description: &str,
        difficulty_level: u8,
    ) -> Result<u64> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(ParloError::precondition("Please enter a title"));
        }
        if description.is_empty() {
            return Err(ParloError::precondition("Please enter a description"));
        }
        if !Prompt::is_valid_difficulty(difficulty_level) {
            return Err(ParloError::precondition(
                "Difficulty level must be between 1 and 5",
            ));
        }
        if self.roles.resolve(caller).await != UserRole::Admin {
            return Err(ParloError::AccessDenied);
        }

        let id = self
            .backend
            .create_prompt(title, description, difficulty_level)
            .await?;
        tracing::info!(target: "catalog", prompt_id = id, "prompt created");
        self.cache.invalidate(&[CacheKey::Prompts]).await;
        Ok(id)
    }
}
