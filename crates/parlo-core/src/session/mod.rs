//! Practice sessions: domain model and lifecycle state machine.

pub mod machine;
pub mod model;

pub use model::{Session, SessionStatus};
