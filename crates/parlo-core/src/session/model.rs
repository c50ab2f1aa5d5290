//! Session domain model.
//!
//! A session is one practice attempt by a student against a prompt,
//! tracked through a status lifecycle. The status only ever advances
//! forward; see [`super::machine`] for the legality rules.

use crate::user::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a practice session.
///
/// `Completed` and `SubmittedForReview` are two tagged variants of the
/// same semantic "awaiting review" condition: `Completed` survives only
/// as a legacy intermediate state, while the student-facing complete
/// action always lands on `SubmittedForReview`. Both are review-eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// The student is still practicing; no recording yet.
    InProgress,
    /// Legacy intermediate state, review-eligible.
    Completed,
    /// The recording was submitted and awaits teacher feedback.
    SubmittedForReview,
    /// A teacher reviewed the session. Terminal.
    Reviewed,
}

impl SessionStatus {
    /// Whether a reviewer may act on a session in this status.
    pub fn is_awaiting_review(self) -> bool {
        matches!(self, Self::Completed | Self::SubmittedForReview)
    }
}

/// Represents one practice attempt in the domain layer.
///
/// Owned by the student who started it; mutated only through the
/// defined transitions; never deleted by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier
    pub session_id: u64,
    /// Identity of the owning student
    pub student_id: Identity,
    /// Snapshot of the prompt this session practices
    pub prompt: crate::prompt::Prompt,
    /// Current lifecycle status
    pub status: SessionStatus,
    /// When the session was started
    pub start_time: DateTime<Utc>,
    /// When the session was completed, if it has been
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Recording location; absent while in progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    /// Teacher feedback; immutable once set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Session {
    /// Whether `caller` owns this session.
    pub fn owned_by(&self, caller: &Identity) -> bool {
        self.student_id == *caller
    }
}
