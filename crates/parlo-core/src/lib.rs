//! Domain layer of the Parlo speaking-practice client.
//!
//! Holds the models, the session lifecycle state machine, the access
//! guard, the prompt catalog filter, and the [`backend::SpeakingBackend`]
//! trait describing the remote service boundary. Everything here is
//! free of I/O except the backend trait itself; use cases live in
//! `parlo-application` and the concrete gateway in
//! `parlo-infrastructure`.

pub mod access;
pub mod backend;
pub mod error;
pub mod prompt;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{ParloError, Result};
