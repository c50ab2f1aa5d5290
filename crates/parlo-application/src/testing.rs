//! Shared test doubles for the use-case layer.
//!
//! `MockBackend` is an in-memory stand-in for the remote service. It
//! counts calls per operation so tests can assert that locally
//! rejected requests never reached the remote boundary, and it can be
//! told to fail the next call to a given operation.

use async_trait::async_trait;
use chrono::Utc;
use parlo_core::backend::SpeakingBackend;
use parlo_core::error::{ParloError, Result};
use parlo_core::prompt::Prompt;
use parlo_core::session::{Session, SessionStatus};
use parlo_core::user::{Identity, UserProfile, UserRole};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub(crate) fn prompt(id: u64, level: u8, title: &str, description: &str) -> Prompt {
    Prompt {
        id,
        difficulty_level: level,
        title: title.to_string(),
        description: description.to_string(),
    }
}

pub(crate) fn session(id: u64, owner: &str, status: SessionStatus) -> Session {
    Session {
        session_id: id,
        student_id: Identity::new(owner),
        prompt: prompt(7, 2, "Weekend plans", "Talk about your weekend"),
        status,
        start_time: Utc::now(),
        end_time: None,
        recording_url: None,
        feedback: None,
    }
}

#[derive(Default)]
struct State {
    prompts: Vec<Prompt>,
    sessions: HashMap<u64, Session>,
    roles: HashMap<Identity, UserRole>,
    profiles: HashMap<Identity, UserProfile>,
    caller: Option<Identity>,
    next_session_id: u64,
    calls: HashMap<&'static str, usize>,
    fail_next: HashSet<&'static str>,
}

/// In-memory remote service double with per-operation call counters.
pub(crate) struct MockBackend {
    state: Mutex<State>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_session_id: 100,
                ..State::default()
            }),
        }
    }

    /// Sets the authenticated caller the service sees, with its role.
    pub fn login(&self, identity: &Identity, role: UserRole) {
        let mut state = self.state.lock().unwrap();
        state.caller = Some(identity.clone());
        state.roles.insert(identity.clone(), role);
    }

    pub fn add_prompt(&self, prompt: Prompt) {
        self.state.lock().unwrap().prompts.push(prompt);
    }

    pub fn insert_session(&self, session: Session) {
        let mut state = self.state.lock().unwrap();
        state.sessions.insert(session.session_id, session);
    }

    pub fn stored_session(&self, id: u64) -> Option<Session> {
        self.state.lock().unwrap().sessions.get(&id).cloned()
    }

    /// The next call to `method` fails with a remote error.
    pub fn fail_next(&self, method: &'static str) {
        self.state.lock().unwrap().fail_next.insert(method);
    }

    pub fn calls(&self, method: &'static str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(method)
            .copied()
            .unwrap_or(0)
    }

    fn enter(&self, method: &'static str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(method).or_insert(0) += 1;
        if state.fail_next.remove(method) {
            return Err(ParloError::remote(format!("{method}: injected failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl SpeakingBackend for MockBackend {
    async fn get_all_prompts(&self) -> Result<Vec<Prompt>> {
        self.enter("getAllPrompts")?;
        Ok(self.state.lock().unwrap().prompts.clone())
    }

    async fn get_prompt(&self, prompt_id: u64) -> Result<Option<Prompt>> {
        self.enter("getPrompt")?;
        let state = self.state.lock().unwrap();
        Ok(state.prompts.iter().find(|p| p.id == prompt_id).cloned())
    }

    async fn create_prompt(
        &self,
        title: &str,
        description: &str,
        difficulty_level: u8,
    ) -> Result<u64> {
        self.enter("createPrompt")?;
        let mut state = self.state.lock().unwrap();
        let id = state.prompts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        state.prompts.push(Prompt {
            id,
            difficulty_level,
            title: title.to_string(),
            description: description.to_string(),
        });
        Ok(id)
    }

    async fn start_session(&self, prompt_id: u64) -> Result<u64> {
        self.enter("startSession")?;
        let mut state = self.state.lock().unwrap();
        let caller = state
            .caller
            .clone()
            .ok_or(ParloError::AccessDenied)?;
        let prompt = state
            .prompts
            .iter()
            .find(|p| p.id == prompt_id)
            .cloned()
            .ok_or_else(|| ParloError::not_found("prompt", prompt_id))?;
        let id = state.next_session_id;
        state.next_session_id += 1;
        state.sessions.insert(
            id,
            Session {
                session_id: id,
                student_id: caller,
                prompt,
                status: SessionStatus::InProgress,
                start_time: Utc::now(),
                end_time: None,
                recording_url: None,
                feedback: None,
            },
        );
        Ok(id)
    }

    async fn get_session(&self, session_id: u64) -> Result<Session> {
        self.enter("getSession")?;
        self.state
            .lock()
            .unwrap()
            .sessions
            .get(&session_id)
            .cloned()
            .ok_or_else(|| ParloError::not_found("session", session_id))
    }

    async fn get_user_sessions(&self) -> Result<Vec<Session>> {
        self.enter("getUserSessions")?;
        let state = self.state.lock().unwrap();
        let Some(caller) = &state.caller else {
            return Ok(Vec::new());
        };
        Ok(state
            .sessions
            .values()
            .filter(|s| s.student_id == *caller)
            .cloned()
            .collect())
    }

    async fn get_all_sessions(&self) -> Result<Vec<Session>> {
        self.enter("getAllSessions")?;
        let state = self.state.lock().unwrap();
        let is_admin = state
            .caller
            .as_ref()
            .and_then(|c| state.roles.get(c))
            .is_some_and(|r| *r == UserRole::Admin);
        if !is_admin {
            return Err(ParloError::AccessDenied);
        }
        Ok(state.sessions.values().cloned().collect())
    }

    async fn complete_session(&self, session_id: u64, recording_url: &str) -> Result<()> {
        self.enter("completeSession")?;
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| ParloError::not_found("session", session_id))?;
        session.status = SessionStatus::SubmittedForReview;
        session.recording_url = Some(recording_url.to_string());
        session.end_time = Some(Utc::now());
        Ok(())
    }

    async fn review_session(&self, session_id: u64, feedback: &str) -> Result<()> {
        self.enter("reviewSession")?;
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| ParloError::not_found("session", session_id))?;
        session.status = SessionStatus::Reviewed;
        session.feedback = Some(feedback.to_string());
        Ok(())
    }

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>> {
        self.enter("getCallerUserProfile")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .caller
            .as_ref()
            .and_then(|c| state.profiles.get(c))
            .cloned())
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<()> {
        self.enter("saveCallerUserProfile")?;
        let mut state = self.state.lock().unwrap();
        let caller = state.caller.clone().ok_or(ParloError::AccessDenied)?;
        state.profiles.insert(caller, profile.clone());
        Ok(())
    }

    async fn get_caller_user_role(&self) -> Result<UserRole> {
        self.enter("getCallerUserRole")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .caller
            .as_ref()
            .and_then(|c| state.roles.get(c))
            .copied()
            .unwrap_or(UserRole::Guest))
    }

    async fn is_caller_admin(&self) -> Result<bool> {
        self.enter("isCallerAdmin")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .caller
            .as_ref()
            .and_then(|c| state.roles.get(c))
            .is_some_and(|r| *r == UserRole::Admin))
    }

    async fn assign_user_role(&self, target: &Identity, role: UserRole) -> Result<()> {
        self.enter("assignCallerUserRole")?;
        let mut state = self.state.lock().unwrap();
        state.roles.insert(target.clone(), role);
        Ok(())
    }
}
