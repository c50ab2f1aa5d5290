//! Use-case layer of the Parlo speaking-practice client.
//!
//! Sits between the domain layer (`parlo-core`) and the concrete
//! remote gateway (`parlo-infrastructure`): role resolution and route
//! guarding, the session orchestrator, the prompt catalog, the
//! first-login profile gate, admin role assignment, and the shared
//! query cache whose named keys are invalidated after each confirmed
//! mutation.

pub mod admin;
pub mod app;
pub mod cache;
pub mod catalog;
pub mod guard;
pub mod profile;
pub mod role;
pub mod session_usecase;

#[cfg(test)]
pub(crate) mod testing;

pub use app::ParloClient;
pub use cache::{CacheKey, QueryCache};
pub use guard::{Admission, RouteGuard};
pub use role::RoleResolver;
