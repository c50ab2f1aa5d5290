//! The remote backend boundary.
//!
//! Defines the fixed set of operations this client consumes from the
//! remote data/authority service. All durable state (prompts,
//! sessions, profiles, role assignments) lives behind this trait; the
//! client never persists anything itself. Admin-only operations are
//! re-enforced server-side regardless of the client's own checks.

use crate::error::Result;
use crate::prompt::Prompt;
use crate::session::Session;
use crate::user::{Identity, UserProfile, UserRole};
use async_trait::async_trait;

/// Remote service consumed by the client.
///
/// Every method is a suspension point: the call is non-blocking and
/// the UI stays responsive while it is in flight. Absence of a value
/// is an explicit `Option`, never a sentinel.
#[async_trait]
pub trait SpeakingBackend: Send + Sync {
    // --- Prompts ---

    /// Returns the full prompt catalog.
    async fn get_all_prompts(&self) -> Result<Vec<Prompt>>;

    /// Returns one prompt, or `None` if it does not exist.
    async fn get_prompt(&self, prompt_id: u64) -> Result<Option<Prompt>>;

    /// Creates a prompt and returns its id. Admin only (server-enforced).
    async fn create_prompt(
        &self,
        title: &str,
        description: &str,
        difficulty_level: u8,
    ) -> Result<u64>;

    // --- Sessions ---

    /// Starts a practice session for the caller and returns its id.
    async fn start_session(&self, prompt_id: u64) -> Result<u64>;

    /// Returns one session.
    async fn get_session(&self, session_id: u64) -> Result<Session>;

    /// Returns the caller's own sessions.
    async fn get_user_sessions(&self) -> Result<Vec<Session>>;

    /// Returns every session. Admin only (server-enforced).
    async fn get_all_sessions(&self) -> Result<Vec<Session>>;

    /// Marks the caller's session complete with its recording.
    async fn complete_session(&self, session_id: u64, recording_url: &str) -> Result<()>;

    /// Records teacher feedback and closes the lifecycle. Admin only
    /// (server-enforced).
    async fn review_session(&self, session_id: u64, feedback: &str) -> Result<()>;

    // --- Profiles & roles ---

    /// Returns the caller's profile, or `None` before first-login setup.
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>>;

    /// Creates or updates the caller's own profile.
    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<()>;

    /// Returns the caller's authoritative role.
    async fn get_caller_user_role(&self) -> Result<UserRole>;

    /// Whether the caller holds the admin role.
    async fn is_caller_admin(&self) -> Result<bool>;

    /// Assigns a role to `target`. Admin only (server-enforced).
    async fn assign_user_role(&self, target: &Identity, role: UserRole) -> Result<()>;
}
