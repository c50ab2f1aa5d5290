//! User identity, roles, and profile.

pub mod model;

pub use model::{Identity, UserProfile, UserRole};
