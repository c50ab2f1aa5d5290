//! Route guard.
//!
//! Combines the role resolver with the pure access decision so every
//! protected route checks the caller before any protected content is
//! fetched, even transiently. Resolution is asynchronous; while it is
//! in flight the caller renders a loading state and must not admit or
//! deny optimistically.

use crate::role::RoleResolver;
use parlo_core::access::{Route, can_access};
use parlo_core::error::{ParloError, Result};
use parlo_core::user::{Identity, UserRole};
use std::sync::Arc;

/// Outcome of a route admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Render the route; the caller's resolved role is attached.
    Granted(UserRole),
    /// Render the fixed access-denied outcome; fetch nothing protected.
    Denied,
}

/// Gates entry into role-protected routes.
pub struct RouteGuard {
    roles: Arc<RoleResolver>,
}

impl RouteGuard {
    pub fn new(roles: Arc<RoleResolver>) -> Self {
        Self { roles }
    }

    /// Decides admission for `route`.
    pub async fn check(&self, caller: Option<&Identity>, route: &Route) -> Admission {
        let resolved = self.roles.resolve(caller).await;
        if can_access(route.required_role(), resolved) {
            Admission::Granted(resolved)
        } else {
            tracing::debug!(target: "guard", path = %route.path(), ?resolved, "route denied");
            Admission::Denied
        }
    }

    /// Like [`check`](Self::check) but for action paths: a denial is
    /// the typed access-denied error.
    pub async fn require(&self, caller: Option<&Identity>, route: &Route) -> Result<UserRole> {
        match self.check(caller, route).await {
            Admission::Granted(role) => Ok(role),
            Admission::Denied => Err(ParloError::AccessDenied),
        }
    }
}
