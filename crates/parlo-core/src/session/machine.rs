//! Session lifecycle state machine.
//!
//! Pure decision functions consulted by the orchestrator before any
//! remote call is issued. Each check validates the requested
//! transition against the locally known session, the caller's
//! identity/ownership, and the caller's resolved role, and returns the
//! status a legal request lands on. Illegal requests come back as
//! typed precondition or access-denied errors, so the caller gets
//! immediate, deterministic feedback without a wasted round-trip.
//!
//! The lifecycle only ever advances:
//!
//! ```text
//! (none) --start--> InProgress --complete--> SubmittedForReview --review--> Reviewed
//!                                Completed  -------------------review-----^
//! ```
//!
//! `Completed` is a legacy intermediate state; the student-facing
//! complete action never targets it, but a session found in it is
//! review-eligible exactly like `SubmittedForReview`.

use super::model::{Session, SessionStatus};
use crate::error::{ParloError, Result};
use crate::user::{Identity, UserRole};

/// Validates a start request.
///
/// Any authenticated caller may start a session; a guest may not.
pub fn check_start(caller: Option<&Identity>) -> Result<SessionStatus> {
    if caller.is_none() {
        return Err(ParloError::precondition(
            "Please login to start practicing",
        ));
    }
    Ok(SessionStatus::InProgress)
}

/// Validates a complete request against the locally known session.
///
/// Legal only while the session is `InProgress`, only for the owning
/// student, and only with a non-empty recording URL. A legal complete
/// always lands on `SubmittedForReview`; `Completed` is never a
/// student-reachable end state.
pub fn check_complete(
    session: &Session,
    caller: &Identity,
    recording_url: &str,
) -> Result<SessionStatus> {
    if recording_url.trim().is_empty() {
        return Err(ParloError::precondition("Please enter a recording URL"));
    }
    if !session.owned_by(caller) {
        return Err(ParloError::AccessDenied);
    }
    if session.status != SessionStatus::InProgress {
        return Err(ParloError::precondition(format!(
            "Session {} is no longer in progress",
            session.session_id
        )));
    }
    Ok(SessionStatus::SubmittedForReview)
}

/// Validates a review request against the locally known session.
///
/// Admin only; the session must be awaiting review (either
/// `SubmittedForReview` or the legacy `Completed`), and the feedback
/// must be non-empty. A reviewed session is never reviewable again:
/// feedback is immutable once set.
pub fn check_review(
    session: &Session,
    caller_role: UserRole,
    feedback: &str,
) -> Result<SessionStatus> {
    if feedback.trim().is_empty() {
        return Err(ParloError::precondition("Please enter feedback"));
    }
    if caller_role != UserRole::Admin {
        return Err(ParloError::AccessDenied);
    }
    if !session.status.is_awaiting_review() {
        return Err(ParloError::precondition(format!(
            "Session {} is not awaiting review",
            session.session_id
        )));
    }
    Ok(SessionStatus::Reviewed)
}
