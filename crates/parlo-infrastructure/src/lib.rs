//! Infrastructure layer: the concrete remote boundary.
//!
//! Provides [`GatewayConfig`] (file/env client configuration) and
//! [`HttpGateway`], the HTTP/JSON implementation of
//! `parlo_core::backend::SpeakingBackend`.

pub mod config;
pub mod gateway;

pub use config::GatewayConfig;
pub use gateway::HttpGateway;
