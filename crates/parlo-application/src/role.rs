//! Role resolution with a per-identity cache.
//!
//! The resolver derives the caller's effective role from the remote
//! service. A missing identity is a guest without any remote call. A
//! failed remote lookup is also treated as guest (fail-closed) and the
//! failure is not cached, so a later retry can still surface the real
//! role. Cached entries are dropped on identity change and after a
//! successful role assignment.

use parlo_core::backend::SpeakingBackend;
use parlo_core::user::{Identity, UserRole};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolves and caches the authoritative role per identity.
pub struct RoleResolver {
    backend: Arc<dyn SpeakingBackend>,
    cache: RwLock<HashMap<Identity, UserRole>>,
}

impl RoleResolver {
    pub fn new(backend: Arc<dyn SpeakingBackend>) -> Self {
        Self {
            backend,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the caller's effective role.
    ///
    /// Never fails: a guest stays a guest without a remote call, and a
    /// remote failure degrades to guest rather than surfacing a
    /// transient elevated role.
    pub async fn resolve(&self, caller: Option<&Identity>) -> UserRole {
        let Some(identity) = caller else {
            return UserRole::Guest;
        };

        if let Some(role) = self.cache.read().await.get(identity) {
            return *role;
        }

        match self.backend.get_caller_user_role().await {
            Ok(role) => {
                self.cache.write().await.insert(identity.clone(), role);
                role
            }
            Err(e) => {
                tracing::warn!(target: "roles", identity = %identity, "role lookup failed, treating as guest: {e}");
                UserRole::Guest
            }
        }
    }

    /// Drops the cached role for one identity (after role assignment).
    pub async fn invalidate(&self, identity: &Identity) {
        self.cache.write().await.remove(identity);
    }

    /// Drops every cached role (login/logout).
    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }
}
