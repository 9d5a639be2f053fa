use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::TravelError;

/// An opaque bearer token bound to exactly one role-tagged principal.
///
/// The `token` field holds the plaintext only on the value returned from
/// [`TokenRepository::create_token`]; at rest, implementations store the
/// SHA-256 digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    #[serde(flatten)]
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for session tokens.
#[async_trait]
pub trait TokenRepository {
    /// Issues a fresh token for the principal. The returned value carries
    /// the plaintext token; it is not recoverable afterwards.
    async fn create_token(
        &self,
        role: Role,
        expires_at: DateTime<Utc>,
    ) -> Result<AccessToken, TravelError>;

    /// Looks up by plaintext token (implementations hash before comparing).
    async fn find_token(&self, token: &str) -> Result<Option<AccessToken>, TravelError>;

    /// Revokes a token. Succeeds even when the token is already gone.
    async fn revoke_token(&self, token: &str) -> Result<(), TravelError>;
}
