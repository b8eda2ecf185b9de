use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EstimatorError, Result};

/// A signed-in session. The core only ever asks "current session or none"
/// to gate save/report actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub email: String,
}

/// Opaque identity collaborator. The estimation engine itself never depends
/// on authentication succeeding.
#[async_trait]
pub trait Identity: Send + Sync {
    async fn current_session(&self) -> Option<Session>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;
    async fn sign_out(&self);
}

#[derive(Default)]
struct InMemoryState {
    // email -> password
    accounts: HashMap<String, String>,
    current: Option<Session>,
}

/// Process-local identity provider for tests and single-user sessions.
#[derive(Default)]
pub struct InMemoryIdentity {
    state: Mutex<InMemoryState>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Identity for InMemoryIdentity {
    async fn current_session(&self) -> Option<Session> {
        self.state.lock().unwrap().current.clone()
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let mut state = self.state.lock().unwrap();
        if state.accounts.contains_key(email) {
            return Err(EstimatorError::Authentication(format!(
                "account already exists for {}",
                email
            )));
        }
        state.accounts.insert(email.to_string(), password.to_string());
        let session = Session {
            token: Uuid::new_v4(),
            email: email.to_string(),
        };
        state.current = Some(session.clone());
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let mut state = self.state.lock().unwrap();
        match state.accounts.get(email) {
            Some(stored) if stored == password => {
                let session = Session {
                    token: Uuid::new_v4(),
                    email: email.to_string(),
                };
                state.current = Some(session.clone());
                Ok(session)
            }
            _ => Err(EstimatorError::Authentication(
                "invalid email or password".to_string(),
            )),
        }
    }

    async fn sign_out(&self) {
        self.state.lock().unwrap().current = None;
    }
}
