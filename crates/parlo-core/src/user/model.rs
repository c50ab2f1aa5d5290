//! Identity, role, and profile domain models.
//!
//! An [`Identity`] is the authenticated principal making a request;
//! its absence (an `Option<Identity>` of `None`) denotes a guest.
//! The authoritative role always comes from the role resolver, never
//! from the profile, whose `role` field is display-only.

use serde::{Deserialize, Serialize};

/// Opaque principal identifier of an authenticated caller.
///
/// The client never interprets the contents; it only compares
/// identities for equality (session ownership, role cache keys).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    pub fn new(principal: impl Into<String>) -> Self {
        Self(principal.into())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse authorization level of a caller.
///
/// `Admin` covers both teachers and administrators; the platform
/// conflates the two into a single elevated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Unauthenticated, or authenticated with no assigned role.
    Guest,
    /// A student.
    User,
    /// A teacher or administrator.
    Admin,
}

impl UserRole {
    /// Whether a caller holding this role satisfies `required`.
    ///
    /// `Admin` is a superset of `User` capability; `Guest` as a
    /// requirement admits everyone.
    pub fn satisfies(self, required: UserRole) -> bool {
        match required {
            UserRole::Admin => self == UserRole::Admin,
            UserRole::User => matches!(self, UserRole::User | UserRole::Admin),
            UserRole::Guest => true,
        }
    }
}

/// User profile domain model.
///
/// Created once per identity on first login, thereafter mutable by its
/// owner only. The `role` string is what the profile owner chose to
/// display; authorization decisions never read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User's display name
    pub name: String,
    /// Display-only role label ("user", "admin", ...)
    pub role: String,
}
