//! Admin use case: role assignment.
//!
//! Role assignment is admin-only, locally guarded and re-enforced
//! server-side. A successful assignment drops the target's cached
//! role and the caller-facing role views so nothing stale survives.

use crate::cache::{CacheKey, QueryCache};
use crate::role::RoleResolver;
use parlo_core::backend::SpeakingBackend;
use parlo_core::error::{ParloError, Result};
use parlo_core::user::{Identity, UserRole};
use std::sync::Arc;

pub struct AdminUseCase {
    backend: Arc<dyn SpeakingBackend>,
    cache: Arc<QueryCache>,
    roles: Arc<RoleResolver>,
}

impl AdminUseCase {
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

    /// Whether the caller holds the admin role, cache-first.
    ///
    /// A guest is never an admin and costs no remote call; a remote
    /// failure reads as not-admin (fail-closed) and is not cached.
    pub async fn is_caller_admin(&self, caller: Option<&Identity>) -> bool {
        if caller.is_none() {
            return false;
        }
        if let Some(flag) = self.cache.is_admin().await {
            return flag;
        }
        match self.backend.is_caller_admin().await {
            Ok(flag) => {
                self.cache.set_is_admin(flag).await;
                flag
            }
            Err(e) => {
                tracing::warn!(target: "admin", "admin check failed, treating as non-admin: {e}");
                false
            }
        }
    }

    /// Assigns `role` to `target`. Admin only.
    pub async fn assign_role(
        &self,
        caller: Option<&Identity>,
        target: &Identity,
        role: UserRole,
    ) -> Result<()> {
        if !self.is_caller_admin(caller).await {
            return Err(ParloError::AccessDenied);
        }

        self.backend.assign_user_role(target, role).await?;
        tracing::info!(target: "admin", target_identity = %target, ?role, "role assigned");
        self.roles.invalidate(target).await;
        self.cache
            .invalidate(&[CacheKey::CurrentUserRole, CacheKey::IsAdmin])
            .await;
        Ok(())
    }
}
