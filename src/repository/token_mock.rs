#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::crypto::{generate_token, hash_token, DEFAULT_TOKEN_LENGTH};
use crate::role::Role;
use crate::TravelError;

use super::token::{AccessToken, TokenRepository};

/// In-memory token store for tests. Stores hashes, hands out plaintext once,
/// same contract as the SQLite implementation.
#[derive(Clone)]
pub struct MockTokenRepository {
    pub tokens: Arc<Mutex<Vec<AccessToken>>>,
    token_length: usize,
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self {
            tokens: Arc::default(),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the generated token length, usually with
    /// `WaypointConfig::token_length`.
    pub fn with_token_length(mut self, length: usize) -> Self {
        self.token_length = length;
        self
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create_token(
        &self,
        role: Role,
        expires_at: DateTime<Utc>,
    ) -> Result<AccessToken, TravelError> {
        let plain = generate_token(self.token_length);
        let now = Utc::now();

        let stored = AccessToken {
            token: hash_token(&plain),
            role,
            expires_at,
            created_at: now,
        };
        self.tokens.lock().unwrap().push(stored);

        Ok(AccessToken {
            token: plain,
            role,
            expires_at,
            created_at: now,
        })
    }

    async fn find_token(&self, token: &str) -> Result<Option<AccessToken>, TravelError> {
        let hashed = hash_token(token);
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens.iter().find(|t| t.token == hashed).cloned())
    }

    async fn revoke_token(&self, token: &str) -> Result<(), TravelError> {
        let hashed = hash_token(token);
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|t| t.token != hashed);
        Ok(())
    }
}
