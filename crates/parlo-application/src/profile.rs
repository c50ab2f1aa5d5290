//! Caller profile use case and the first-login setup gate.
//!
//! A profile is created once per identity on first login. Until it is
//! saved, [`ProfileUseCase::needs_setup`] reports that the one
//! mandatory setup prompt must be shown, and
//! [`ProfileUseCase::require_profile`] keeps protected content fetches
//! from proceeding.

use crate::cache::{CacheKey, QueryCache};
use parlo_core::backend::SpeakingBackend;
use parlo_core::error::{ParloError, Result};
use parlo_core::user::{Identity, UserProfile};
use std::sync::Arc;

pub struct ProfileUseCase {
    backend: Arc<dyn SpeakingBackend>,
    cache: Arc<QueryCache>,
}

impl ProfileUseCase {
    pub fn new(backend: Arc<dyn SpeakingBackend>, cache: Arc<QueryCache>) -> Self {
        Self { backend, cache }
    }

    /// Returns the caller's profile, cache-first.
    ///
    /// `Ok(None)` means the identity has no profile yet; a guest is
    /// always `Ok(None)` without a remote call.
    pub async fn caller_profile(&self, caller: Option<&Identity>) -> Result<Option<UserProfile>> {
        if caller.is_none() {
            return Ok(None);
        }
        if let Some(profile) = self.cache.caller_profile().await {
            return Ok(profile);
        }
        let profile = self.backend.get_caller_user_profile().await?;
        self.cache.set_caller_profile(profile.clone()).await;
        Ok(profile)
    }

    /// Whether the mandatory first-login setup prompt must be shown:
    /// authenticated, fetched, and no profile saved yet.
    pub async fn needs_setup(&self, caller: Option<&Identity>) -> Result<bool> {
        if caller.is_none() {
            return Ok(false);
        }
        Ok(self.caller_profile(caller).await?.is_none())
    }

    /// Saves the caller's own profile.
    pub async fn save_profile(&self, caller: Option<&Identity>, profile: UserProfile) -> Result<()> {
        if caller.is_none() {
            return Err(ParloError::precondition("Please login first"));
        }
        let name = profile.name.trim();
        if name.is_empty() {
            return Err(ParloError::precondition("Please enter your name"));
        }
        let trimmed = UserProfile {
            name: name.to_string(),
            role: profile.role,
        };

        self.backend.save_caller_user_profile(&trimmed).await?;
        tracing::info!(target: "profile", "caller profile saved");
        self.cache.invalidate(&[CacheKey::CurrentUserProfile]).await;
        Ok(())
    }

    /// Gate for protected content: the caller must be authenticated
    /// and have a saved profile.
    pub async fn require_profile(&self, caller: Option<&Identity>) -> Result<UserProfile> {
        if caller.is_none() {
            return Err(ParloError::precondition("Please login first"));
        }
        self.caller_profile(caller)
            .await?
            .ok_or_else(|| ParloError::precondition("Please set up your profile first"))
    }
}
