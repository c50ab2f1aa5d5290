//! HTTP/JSON gateway to the remote speaking-practice service.
//!
//! Each backend operation becomes a JSON POST to
//! `{gateway_url}/api/{method}`. The server enforces every
//! authorization rule on its side; this client forwards the caller's
//! bearer token and maps HTTP status codes onto the core error
//! taxonomy: 401/403 become access denials, 404 becomes not-found,
//! anything else that fails is a recoverable remote error.

use async_trait::async_trait;
use parlo_core::backend::SpeakingBackend;
use parlo_core::error::{ParloError, Result};
use parlo_core::prompt::Prompt;
use parlo_core::session::Session;
use parlo_core::user::{Identity, UserProfile, UserRole};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::GatewayConfig;

/// Maps a non-success HTTP status onto the core error taxonomy.
pub fn status_to_error(status: StatusCode, method: &str) -> ParloError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ParloError::AccessDenied,
        StatusCode::NOT_FOUND => ParloError::NotFound {
            entity_type: "resource",
            id: method.to_string(),
        },
        other => ParloError::remote(format!("{method} returned {other}")),
    }
}

/// `SpeakingBackend` over HTTP.
pub struct HttpGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Issues one JSON call and decodes the response body.
    async fn call<P: Serialize, R: DeserializeOwned>(&self, method: &str, params: &P) -> Result<R> {
        let url = format!("{}/api/{method}", self.config.gateway_url.trim_end_matches('/'));
        tracing::debug!(target: "gateway", %url, "calling {method}");

        let mut request = self.http.post(&url).json(params);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ParloError::remote(format!("{method}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(target: "gateway", %status, "{method} failed");
            return Err(status_to_error(status, method));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ParloError::Serialization {
                format: "JSON".to_string(),
                message: format!("{method}: {e}"),
            })
    }

    /// Retags a generic gateway not-found with the entity it concerns.
    fn retag_not_found(err: ParloError, entity_type: &'static str, id: u64) -> ParloError {
        if err.is_not_found() {
            ParloError::not_found(entity_type, id)
        } else {
            err
        }
    }
}

#[async_trait]
impl SpeakingBackend for HttpGateway {
    async fn get_all_prompts(&self) -> Result<Vec<Prompt>> {
        self.call("getAllPrompts", &json!({})).await
    }

    async fn get_prompt(&self, prompt_id: u64) -> Result<Option<Prompt>> {
        self.call("getPrompt", &json!({ "promptId": prompt_id }))
            .await
            .map_err(|e| Self::retag_not_found(e, "prompt", prompt_id))
    }

    async fn create_prompt(
        &self,
        title: &str,
        description: &str,
        difficulty_level: u8,
    ) -> Result<u64> {
        self.call(
            "createPrompt",
            &json!({
                "title": title,
                "description": description,
                "difficultyLevel": difficulty_level,
            }),
        )
        .await
    }

    async fn start_session(&self, prompt_id: u64) -> Result<u64> {
        self.call("startSession", &json!({ "promptId": prompt_id }))
            .await
            .map_err(|e| Self::retag_not_found(e, "prompt", prompt_id))
    }

    async fn get_session(&self, session_id: u64) -> Result<Session> {
        self.call("getSession", &json!({ "sessionId": session_id }))
            .await
            .map_err(|e| Self::retag_not_found(e, "session", session_id))
    }

    async fn get_user_sessions(&self) -> Result<Vec<Session>> {
        self.call("getUserSessions", &json!({})).await
    }

    async fn get_all_sessions(&self) -> Result<Vec<Session>> {
        self.call("getAllSessions", &json!({})).await
    }

    async fn complete_session(&self, session_id: u64, recording_url: &str) -> Result<()> {
        self.call(
            "completeSession",
            &json!({ "sessionId": session_id, "recordingUrl": recording_url }),
        )
        .await
        .map_err(|e| Self::retag_not_found(e, "session", session_id))
    }

    async fn review_session(&self, session_id: u64, feedback: &str) -> Result<()> {
        self.call(
            "reviewSession",
            &json!({ "sessionId": session_id, "feedback": feedback }),
        )
        .await
        .map_err(|e| Self::retag_not_found(e, "session", session_id))
    }

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>> {
        self.call("getCallerUserProfile", &json!({})).await
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<()> {
        self.call("saveCallerUserProfile", &json!({ "profile": profile }))
            .await
    }

    async fn get_caller_user_role(&self) -> Result<UserRole> {
        self.call("getCallerUserRole", &json!({})).await
    }

    async fn is_caller_admin(&self) -> Result<bool> {
        self.call("isCallerAdmin", &json!({})).await
    }

    async fn assign_user_role(&self, target: &Identity, role: UserRole) -> Result<()> {
        self.call(
            "assignCallerUserRole",
            &json!({ "user": target, "role": role }),
        )
        .await
    }
}
