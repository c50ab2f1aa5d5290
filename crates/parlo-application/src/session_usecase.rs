//! Session orchestration use case.
//!
//! Coordinates the session lifecycle: every transition request is
//! validated against the state machine and the caller's
//! identity/role *before* the remote service is invoked, so illegal
//! requests fail locally with deterministic, typed errors and no
//! wasted round-trip. After a confirmed remote success exactly the
//! affected cache keys are invalidated; a remote failure leaves every
//! cached view untouched and surfaces as a recoverable error. No
//! silent retries, no optimistic-concurrency tokens: concurrent admin
//! reviewers resolve last-write-wins at the service.

use crate::cache::{CacheKey, QueryCache};
use crate::role::RoleResolver;
use parlo_core::backend::SpeakingBackend;
use parlo_core::error::{ParloError, Result};
use parlo_core::session::{Session, machine};
use parlo_core::user::{Identity, UserRole};
use std::sync::Arc;

/// Use case for starting, completing, reviewing, and reading sessions.
pub struct SessionUseCase {
    backend: Arc<dyn SpeakingBackend>,
    cache: Arc<QueryCache>,
    roles: Arc<RoleResolver>,
}

impl SessionUseCase {
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

    /// Starts a practice session against `prompt_id`.
    ///
    /// Requires an authenticated caller and an existing prompt. On
    /// success the new session becomes visible in the caller's own
    /// history and the admin-wide listing on their next read.
    pub async fn start_practice(
        &self,
        caller: Option<&Identity>,
        prompt_id: u64,
    ) -> Result<u64> {
        machine::check_start(caller)?;

        let known = match self.cache.prompt(prompt_id).await {
            Some(prompt) => Some(prompt),
            None => self.backend.get_prompt(prompt_id).await?,
        };
        let Some(prompt) = known else {
            return Err(ParloError::not_found("prompt", prompt_id));
        };
        self.cache.set_prompt(prompt).await;

        let session_id = self.backend.start_session(prompt_id).await?;
        tracing::info!(target: "sessions", session_id, prompt_id, "practice session started");
        self.cache
            .invalidate(&[CacheKey::UserSessions, CacheKey::AllSessions])
            .await;
        Ok(session_id)
    }

    /// Submits the caller's recording and moves the session to
    /// `SubmittedForReview`.
    pub async fn complete_session(
        &self,
        caller: &Identity,
        session_id: u64,
        recording_url: &str,
    ) -> Result<()> {
        // Empty input never costs a fetch, let alone a mutation.
        if recording_url.trim().is_empty() {
            return Err(ParloError::precondition("Please enter a recording URL"));
        }

        let session = self.session(session_id).await?;
        machine::check_complete(&session, caller, recording_url)?;

        self.backend
            .complete_session(session_id, recording_url.trim())
            .await?;
        tracing::info!(target: "sessions", session_id, "session submitted for review");
        self.cache
            .invalidate(&[
                CacheKey::UserSessions,
                CacheKey::AllSessions,
                CacheKey::SessionDetails,
            ])
            .await;
        Ok(())
    }

    /// Records teacher feedback and closes the session lifecycle.
    pub async fn review_session(
        &self,
        caller: Option<&Identity>,
        session_id: u64,
        feedback: &str,
    ) -> Result<()> {
        if feedback.trim().is_empty() {
            return Err(ParloError::precondition("Please enter feedback"));
        }

        // Authorization short-circuits before the session fetch.
        let role = self.roles.resolve(caller).await;
        if role != UserRole::Admin {
            return Err(ParloError::AccessDenied);
        }

        let session = self.session(session_id).await?;
        machine::check_review(&session, role, feedback)?;

        self.backend
            .review_session(session_id, feedback.trim())
            .await?;
        tracing::info!(target: "sessions", session_id, "session reviewed");
        self.cache
            .invalidate(&[
                CacheKey::AllSessions,
                CacheKey::SessionDetails,
                CacheKey::UserSessions,
            ])
            .await;
        Ok(())
    }

    /// Returns one session, cache-first.
    pub async fn session(&self, session_id: u64) -> Result<Session> {
        if let Some(session) = self.cache.session(session_id).await {
            return Ok(session);
        }
        let session = self.backend.get_session(session_id).await?;
        self.cache.set_session(session.clone()).await;
        Ok(session)
    }

    /// Returns the caller's own session history, cache-first.
    ///
    /// Own history only ever contains sessions whose student is the
    /// caller, regardless of what the service returned.
    pub async fn user_sessions(&self, caller: &Identity) -> Result<Vec<Session>> {
        if let Some(sessions) = self.cache.user_sessions().await {
            return Ok(sessions);
        }
        let mut sessions = self.backend.get_user_sessions().await?;
        sessions.retain(|s| s.owned_by(caller));
        self.cache.set_user_sessions(sessions.clone()).await;
        Ok(sessions)
    }

    /// Returns the admin-wide session listing, cache-first. Admin only.
    pub async fn all_sessions(&self, caller: Option<&Identity>) -> Result<Vec<Session>> {
        if self.roles.resolve(caller).await != UserRole::Admin {
            return Err(ParloError::AccessDenied);
        }
        if let Some(sessions) = self.cache.all_sessions().await {
            return Ok(sessions);
        }
        let sessions = self.backend.get_all_sessions().await?;
        self.cache.set_all_sessions(sessions.clone()).await;
        Ok(sessions)
    }
}
