//! Access guard and the role-gated route table.
//!
//! The guard is a pure decision function: given the role a view or
//! action requires and the caller's resolved role, admit or deny.
//! Client-side checks are advisory UX only; the remote service
//! re-enforces every authorization rule server-side, so this module is
//! never the sole enforcement point.

use crate::user::UserRole;

/// Decides whether a caller with `resolved` role may enter a view or
/// action requiring `required` role.
///
/// Pure; no side effects. While role resolution is still pending the
/// caller must render a loading state and must not call this with a
/// guessed role.
pub fn can_access(required: UserRole, resolved: UserRole) -> bool {
    resolved.satisfies(required)
}

/// The navigable surface whose entries are gated by role.
///
/// Each protected route must consult the guard before rendering
/// protected content, even transiently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing / practice page. Open; actions on it gate themselves.
    Practice,
    /// Prompt library browser. Open.
    Library,
    /// A student's own session detail.
    Session(u64),
    /// Teacher dashboard listing every submission.
    Teacher,
    /// Review screen for one submission.
    TeacherReview(u64),
    /// Prompt curation screen.
    AdminPrompts,
}

impl Route {
    /// The minimum role required to enter this route.
    pub fn required_role(&self) -> UserRole {
        match self {
            Route::Practice | Route::Library => UserRole::Guest,
            Route::Session(_) => UserRole::User,
            Route::Teacher | Route::TeacherReview(_) | Route::AdminPrompts => UserRole::Admin,
        }
    }

    /// Path rendered in navigation, mirroring the web client's routes.
    pub fn path(&self) -> String {
        match self {
            Route::Practice => "/practice".to_string(),
            Route::Library => "/library".to_string(),
            Route::Session(id) => format!("/session/{id}"),
            Route::Teacher => "/teacher".to_string(),
            Route::TeacherReview(id) => format!("/teacher/review/{id}"),
            Route::AdminPrompts => "/admin/prompts".to_string(),
        }
    }
}
