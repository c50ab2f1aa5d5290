//! Client-side query cache with named-key invalidation.
//!
//! Every fetched view (prompt catalog, session lists, session details,
//! caller profile/role) is cached process-wide under a [`CacheKey`].
//! The only mutators are the use cases: after a confirmed remote
//! success they invalidate exactly the keys that mutation affects, in
//! one atomic batch under a single write lock, and registered
//! listeners are then notified so stale views re-read. A failed remote
//! call invalidates nothing; prior cached state stays untouched.

use parlo_core::prompt::Prompt;
use parlo_core::session::Session;
use parlo_core::user::{UserProfile, UserRole};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Names of the cached views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey {
    /// The full prompt catalog
    Prompts,
    /// One prompt detail
    Prompt(u64),
    /// The caller's own session history
    UserSessions,
    /// The admin-wide session listing
    AllSessions,
    /// One session detail
    Session(u64),
    /// Every cached session detail at once
    SessionDetails,
    /// The caller's profile
    CurrentUserProfile,
    /// The caller's resolved role
    CurrentUserRole,
    /// The caller's admin flag
    IsAdmin,
}

/// Listener invoked with the batch of keys an invalidation cleared.
pub type CacheListener = Arc<dyn Fn(&[CacheKey]) + Send + Sync>;

#[derive(Default)]
struct Store {
    prompts: Option<Vec<Prompt>>,
    prompt_details: HashMap<u64, Prompt>,
    user_sessions: Option<Vec<Session>>,
    all_sessions: Option<Vec<Session>>,
    session_details: HashMap<u64, Session>,
    // Outer Option: fetched yet? Inner: profile exists?
    caller_profile: Option<Option<UserProfile>>,
    caller_role: Option<UserRole>,
    is_admin: Option<bool>,
}

impl Store {
    fn clear_key(&mut self, key: CacheKey) {
        match key {
            CacheKey::Prompts => self.prompts = None,
            CacheKey::Prompt(id) => {
                self.prompt_details.remove(&id);
            }
            CacheKey::UserSessions => self.user_sessions = None,
            CacheKey::AllSessions => self.all_sessions = None,
            CacheKey::Session(id) => {
                self.session_details.remove(&id);
            }
            CacheKey::SessionDetails => self.session_details.clear(),
            CacheKey::CurrentUserProfile => self.caller_profile = None,
            CacheKey::CurrentUserRole => self.caller_role = None,
            CacheKey::IsAdmin => self.is_admin = None,
        }
    }
}

/// Process-wide cache of fetched entities.
pub struct QueryCache {
    store: RwLock<Store>,
    listeners: RwLock<Vec<CacheListener>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Registers a listener notified after each invalidation batch.
    pub async fn subscribe(&self, listener: CacheListener) {
        self.listeners.write().await.push(listener);
    }

    /// Clears the named entries atomically, then notifies listeners
    /// once with the whole batch.
    pub async fn invalidate(&self, keys: &[CacheKey]) {
        {
            let mut store = self.store.write().await;
            for key in keys {
                store.clear_key(*key);
            }
        }
        let listeners = self.listeners.read().await;
        for listener in listeners.iter() {
            listener(keys);
        }
    }

    /// Drops everything. Used when the authenticated identity changes.
    pub async fn clear(&self) {
        *self.store.write().await = Store::default();
    }

    // --- Prompts ---

    pub async fn prompts(&self) -> Option<Vec<Prompt>> {
        self.store.read().await.prompts.clone()
    }

    pub async fn set_prompts(&self, prompts: Vec<Prompt>) {
        self.store.write().await.prompts = Some(prompts);
    }

    pub async fn prompt(&self, id: u64) -> Option<Prompt> {
        self.store.read().await.prompt_details.get(&id).cloned()
    }

    pub async fn set_prompt(&self, prompt: Prompt) {
        self.store
            .write()
            .await
            .prompt_details
            .insert(prompt.id, prompt);
    }

    // --- Sessions ---

    pub async fn user_sessions(&self) -> Option<Vec<Session>> {
        self.store.read().await.user_sessions.clone()
    }

    pub async fn set_user_sessions(&self, sessions: Vec<Session>) {
        self.store.write().await.user_sessions = Some(sessions);
    }

    pub async fn all_sessions(&self) -> Option<Vec<Session>> {
        self.store.read().await.all_sessions.clone()
    }

    pub async fn set_all_sessions(&self, sessions: Vec<Session>) {
        self.store.write().await.all_sessions = Some(sessions);
    }

    pub async fn session(&self, id: u64) -> Option<Session> {
        self.store.read().await.session_details.get(&id).cloned()
    }

    pub async fn set_session(&self, session: Session) {
        self.store
            .write()
            .await
            .session_details
            .insert(session.session_id, session);
    }

    // --- Profile & role ---

    /// `None` = not fetched yet; `Some(None)` = fetched, no profile.
    pub async fn caller_profile(&self) -> Option<Option<UserProfile>> {
        self.store.read().await.caller_profile.clone()
    }

    pub async fn set_caller_profile(&self, profile: Option<UserProfile>) {
        self.store.write().await.caller_profile = Some(profile);
    }

    pub async fn caller_role(&self) -> Option<UserRole> {
        self.store.read().await.caller_role
    }

    pub async fn set_caller_role(&self, role: UserRole) {
        self.store.write().await.caller_role = Some(role);
    }

    pub async fn is_admin(&self) -> Option<bool> {
        self.store.read().await.is_admin
    }

    pub async fn set_is_admin(&self, is_admin: bool) {
        self.store.write().await.is_admin = Some(is_admin);
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn prompt(id: u64) -> Prompt {
        Prompt {
            id,
            difficulty_level: 1,
            title: format!("Prompt {id}"),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_invalidate_clears_only_named_keys() {
        let cache = QueryCache::new();
        cache.set_prompts(vec![prompt(1)]).await;
        cache.set_prompt(prompt(1)).await;
        cache.set_is_admin(true).await;

        cache.invalidate(&[CacheKey::Prompts]).await;

        assert!(cache.prompts().await.is_none());
        assert!(cache.prompt(1).await.is_some());
        assert_eq!(cache.is_admin().await, Some(true));
    }

    #[tokio::test]
    async fn test_session_details_key_clears_all_details() {
        use parlo_core::session::SessionStatus;

        let cache = QueryCache::new();
        let base = crate::testing::session(1, "student-a", SessionStatus::InProgress);
        cache.set_session(base.clone()).await;
        let mut second = base;
        second.session_id = 2;
        cache.set_session(second).await;

        cache.invalidate(&[CacheKey::SessionDetails]).await;

        assert!(cache.session(1).await.is_none());
        assert!(cache.session(2).await.is_none());
    }

    #[tokio::test]
    async fn test_listeners_get_one_batch_per_invalidation() {
        let cache = QueryCache::new();
        let seen: Arc<Mutex<Vec<Vec<CacheKey>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        cache
            .subscribe(Arc::new(move |keys: &[CacheKey]| {
                sink.lock().unwrap().push(keys.to_vec());
            }))
            .await;

        cache
            .invalidate(&[CacheKey::UserSessions, CacheKey::AllSessions])
            .await;

        let batches = seen.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(
            batches[0],
            vec![CacheKey::UserSessions, CacheKey::AllSessions]
        );
    }
}
