//! Client facade wiring the use cases together.
//!
//! [`ParloClient`] owns the current authenticated identity, the shared
//! query cache, and the role resolver, and exposes the operations the
//! UI calls. Login and logout clear every cached view and role so
//! nothing resolved under one identity leaks into the next. Protected
//! reads run behind the first-login profile gate: a profile-less
//! authenticated user gets exactly the mandatory setup prompt and no
//! protected content fetch until a profile is saved.

use crate::admin::AdminUseCase;
use crate::cache::QueryCache;
use crate::catalog::CatalogUseCase;
use crate::guard::{Admission, RouteGuard};
use crate::profile::ProfileUseCase;
use crate::role::RoleResolver;
use crate::session_usecase::SessionUseCase;
use parlo_core::access::Route;
use parlo_core::backend::SpeakingBackend;
use parlo_core::error::{ParloError, Result};
use parlo_core::prompt::{DifficultyFilter, Prompt};
use parlo_core::session::Session;
use parlo_core::user::{Identity, UserProfile, UserRole};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct ParloClient {
    identity: RwLock<Option<Identity>>,
    pub cache: Arc<QueryCache>,
    pub roles: Arc<RoleResolver>,
    pub guard: RouteGuard,
    pub sessions: SessionUseCase,
    pub catalog: CatalogUseCase,
    pub profile: ProfileUseCase,
    pub admin: AdminUseCase,
}

impl ParloClient {
    /// Builds a client over the HTTP gateway described by `config`.
    pub fn from_config(config: parlo_infrastructure::GatewayConfig) -> Self {
        Self::new(Arc::new(parlo_infrastructure::HttpGateway::new(config)))
    }

    pub fn new(backend: Arc<dyn SpeakingBackend>) -> Self {
        let cache = Arc::new(QueryCache::new());
        let roles = Arc::new(RoleResolver::new(backend.clone()));
        Self {
            identity: RwLock::new(None),
            guard: RouteGuard::new(roles.clone()),
            sessions: SessionUseCase::new(backend.clone(), cache.clone(), roles.clone()),
            catalog: CatalogUseCase::new(backend.clone(), cache.clone(), roles.clone()),
            profile: ProfileUseCase::new(backend.clone(), cache.clone()),
            admin: AdminUseCase::new(backend, cache.clone(), roles.clone()),
            cache,
            roles,
        }
    }

    // --- Identity ---

    /// Sets the authenticated identity, dropping all cached state
    /// resolved under the previous one.
    pub async fn login(&self, identity: Identity) {
        tracing::info!(target: "auth", identity = %identity, "logged in");
        *self.identity.write().await = Some(identity);
        self.roles.clear().await;
        self.cache.clear().await;
    }

    /// Clears the identity and every cached view.
    pub async fn logout(&self) {
        tracing::info!(target: "auth", "logged out");
        *self.identity.write().await = None;
        self.roles.clear().await;
        self.cache.clear().await;
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    // --- Routing ---

    /// Admission decision for a route, resolved for the current caller.
    pub async fn check_route(&self, route: &Route) -> Admission {
        let caller = self.identity().await;
        self.guard.check(caller.as_ref(), route).await
    }

    /// The caller's resolved role for view chrome (navigation links,
    /// badges), cache-first. Invalidated by login/logout and by role
    /// assignment.
    pub async fn current_role(&self) -> UserRole {
        if let Some(role) = self.cache.caller_role().await {
            return role;
        }
        let caller = self.identity().await;
        let role = self.roles.resolve(caller.as_ref()).await;
        self.cache.set_caller_role(role).await;
        role
    }

    // --- Profile gate ---

    /// Whether the one mandatory profile-setup prompt must be shown.
    pub async fn needs_profile_setup(&self) -> Result<bool> {
        let caller = self.identity().await;
        self.profile.needs_setup(caller.as_ref()).await
    }

    pub async fn save_profile(&self, profile: UserProfile) -> Result<()> {
        let caller = self.identity().await;
        self.profile.save_profile(caller.as_ref(), profile).await
    }

    // --- Catalog ---

    pub async fn browse_prompts(
        &self,
        difficulty: DifficultyFilter,
        search: &str,
    ) -> Result<Vec<Prompt>> {
        self.catalog.filtered_prompts(difficulty, search).await
    }

    // --- Sessions ---

    pub async fn start_practice(&self, prompt_id: u64) -> Result<u64> {
        let caller = self.identity().await;
        self.profile.require_profile(caller.as_ref()).await?;
        self.sessions.start_practice(caller.as_ref(), prompt_id).await
    }

    /// The caller's own session history. Protected: profile required.
    pub async fn my_sessions(&self) -> Result<Vec<Session>> {
        let caller = self.identity().await;
        self.profile.require_profile(caller.as_ref()).await?;
        let caller = caller.ok_or_else(|| ParloError::precondition("Please login first"))?;
        self.sessions.user_sessions(&caller).await
    }

    pub async fn complete_session(&self, session_id: u64, recording_url: &str) -> Result<()> {
        let caller = self
            .identity()
            .await
            .ok_or_else(|| ParloError::precondition("Please login first"))?;
        self.profile.require_profile(Some(&caller)).await?;
        self.sessions
            .complete_session(&caller, session_id, recording_url)
            .await
    }

    /// The admin-wide listing backing the teacher dashboard.
    ///
    /// Role denial comes first so a non-admin sees the fixed
    /// access-denied outcome; an admin still has to clear the profile
    /// gate before any session data is fetched.
    pub async fn review_queue(&self) -> Result<Vec<Session>> {
        let caller = self.identity().await;
        self.guard.require(caller.as_ref(), &Route::Teacher).await?;
        self.profile.require_profile(caller.as_ref()).await?;
        self.sessions.all_sessions(caller.as_ref()).await
    }

    pub async fn review_session(&self, session_id: u64, feedback: &str) -> Result<()> {
        let caller = self.identity().await;
        self.guard
            .require(caller.as_ref(), &Route::TeacherReview(session_id))
            .await?;
        self.profile.require_profile(caller.as_ref()).await?;
        self.sessions
            .review_session(caller.as_ref(), session_id, feedback)
            .await
    }

    // --- Admin ---

    pub async fn assign_role(&self, target: &Identity, role: UserRole) -> Result<()> {
        let caller = self.identity().await;
        self.admin.assign_role(caller.as_ref(), target, role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBackend, prompt, session};
    use parlo_core::session::SessionStatus;

    fn client_with(backend: Arc<MockBackend>) -> ParloClient {
        ParloClient::new(backend)
    }

    #[tokio::test]
    async fn test_profile_gate_blocks_protected_fetches_until_saved() {
        let backend = Arc::new(MockBackend::new());
        let student = Identity::new("student-a");
        backend.login(&student, UserRole::User);
        backend.add_prompt(prompt(7, 2, "Daily routine", "Mornings"));
        let client = client_with(backend.clone());
        client.login(student).await;

        // Exactly one mandatory setup prompt, nothing protected fetched.
        assert!(client.needs_profile_setup().await.unwrap());
        assert!(client.my_sessions().await.unwrap_err().is_precondition());
        assert!(
            client
                .start_practice(7)
                .await
                .unwrap_err()
                .is_precondition()
        );
        assert_eq!(backend.calls("getUserSessions"), 0);
        assert_eq!(backend.calls("startSession"), 0);

        client
            .save_profile(UserProfile {
                name: "Ada".to_string(),
                role: "user".to_string(),
            })
            .await
            .unwrap();

        assert!(!client.needs_profile_setup().await.unwrap());
        assert!(client.my_sessions().await.is_ok());
        assert!(client.start_practice(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_login_clears_state_resolved_under_previous_identity() {
        let backend = Arc::new(MockBackend::new());
        let teacher = Identity::new("teacher");
        backend.login(&teacher, UserRole::Admin);
        let client = client_with(backend.clone());
        client.login(teacher.clone()).await;

        assert!(matches!(
            client.check_route(&Route::Teacher).await,
            Admission::Granted(UserRole::Admin)
        ));

        // A student logs in on the same client; the admin's resolved
        // role must not leak.
        let student = Identity::new("student-a");
        backend.login(&student, UserRole::User);
        client.login(student).await;

        assert_eq!(client.check_route(&Route::Teacher).await, Admission::Denied);
    }

    #[tokio::test]
    async fn test_guest_is_denied_protected_routes() {
        let backend = Arc::new(MockBackend::new());
        let client = client_with(backend);

        for route in [Route::Session(3), Route::Teacher, Route::AdminPrompts] {
            assert_eq!(client.check_route(&route).await, Admission::Denied);
        }
    }

    #[tokio::test]
    async fn test_complete_session_requires_a_profile() {
        let backend = Arc::new(MockBackend::new());
        let student = Identity::new("student-a");
        backend.login(&student, UserRole::User);
        backend.insert_session(session(11, "student-a", SessionStatus::InProgress));
        let client = client_with(backend.clone());
        client.login(student).await;

        let err = client
            .complete_session(11, "https://x/y")
            .await
            .unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(backend.calls("getSession"), 0);
        assert_eq!(backend.calls("completeSession"), 0);

        client
            .save_profile(UserProfile {
                name: "Ada".to_string(),
                role: "user".to_string(),
            })
            .await
            .unwrap();
        client.complete_session(11, "https://x/y").await.unwrap();
    }

    #[tokio::test]
    async fn test_review_paths_require_a_profile_after_the_role_check() {
        let backend = Arc::new(MockBackend::new());
        let teacher = Identity::new("teacher");
        backend.login(&teacher, UserRole::Admin);
        backend.insert_session(session(11, "student-a", SessionStatus::SubmittedForReview));
        let client = client_with(backend.clone());
        client.login(teacher).await;

        // A profile-less admin clears the guard but not the gate:
        // nothing protected is fetched.
        assert!(client.review_queue().await.unwrap_err().is_precondition());
        assert!(
            client
                .review_session(11, "Good pacing")
                .await
                .unwrap_err()
                .is_precondition()
        );
        assert_eq!(backend.calls("getAllSessions"), 0);
        assert_eq!(backend.calls("getSession"), 0);
        assert_eq!(backend.calls("reviewSession"), 0);

        client
            .save_profile(UserProfile {
                name: "Ms. Lee".to_string(),
                role: "admin".to_string(),
            })
            .await
            .unwrap();
        assert!(client.review_queue().await.is_ok());
        client.review_session(11, "Good pacing").await.unwrap();
    }

    #[tokio::test]
    async fn test_current_role_is_cached_and_refreshed_after_assignment() {
        let backend = Arc::new(MockBackend::new());
        let teacher = Identity::new("teacher");
        backend.login(&teacher, UserRole::Admin);
        let client = client_with(backend.clone());
        client.login(teacher.clone()).await;

        assert_eq!(client.current_role().await, UserRole::Admin);
        assert_eq!(client.current_role().await, UserRole::Admin);
        assert_eq!(backend.calls("getCallerUserRole"), 1);

        // Demoting yourself drops both the resolver entry and the
        // cached view; the next read sees the new role.
        client.assign_role(&teacher, UserRole::User).await.unwrap();
        assert_eq!(client.current_role().await, UserRole::User);
        assert_eq!(backend.calls("getCallerUserRole"), 2);
    }

    #[tokio::test]
    async fn test_review_queue_denied_for_students() {
        let backend = Arc::new(MockBackend::new());
        let student = Identity::new("student-a");
        backend.login(&student, UserRole::User);
        let client = client_with(backend.clone());
        client.login(student).await;

        assert!(client.review_queue().await.unwrap_err().is_access_denied());
        assert_eq!(backend.calls("getAllSessions"), 0);
    }
}
