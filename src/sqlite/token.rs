use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::crypto::{generate_token, hash_token, DEFAULT_TOKEN_LENGTH};
use crate::role::Role;
use crate::{AccessToken, TokenRepository, TravelError};

#[derive(Clone)]
pub struct SqliteTokenRepository {
    pool: SqlitePool,
    token_length: usize,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }

    /// Overrides the generated token length, usually with
    /// `WaypointConfig::token_length`.
    pub fn with_token_length(mut self, length: usize) -> Self {
        self.token_length = length;
        self
    }
}

fn db_error(operation: &str, e: sqlx::Error) -> TravelError {
    log::error!(target: "waypoint", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
    TravelError::DatabaseError(e.to_string())
}

fn role_from_parts(kind: &str, id: i64) -> Result<Role, TravelError> {
    match kind {
        "admin" => Ok(Role::Admin(id)),
        "manager" => Ok(Role::Manager(id)),
        "employee" => Ok(Role::Employee(id)),
        other => Err(TravelError::DatabaseError(format!(
            "unknown role kind '{other}'"
        ))),
    }
}

#[derive(FromRow)]
struct TokenRow {
    role_kind: String,
    role_id: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TokenRow {
    fn into_access_token(self, token: String) -> Result<AccessToken, TravelError> {
        Ok(AccessToken {
            token,
            role: role_from_parts(&self.role_kind, self.role_id)?,
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn create_token(
        &self,
        role: Role,
        expires_at: DateTime<Utc>,
    ) -> Result<AccessToken, TravelError> {
        let plain_token = generate_token(self.token_length);
        let token_hash = hash_token(&plain_token);
        let now = Utc::now();

        let row: TokenRow = sqlx::query_as(
            r"INSERT INTO access_tokens (token_hash, role_kind, role_id, expires_at, created_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING role_kind, role_id, expires_at, created_at",
        )
        .bind(&token_hash)
        .bind(role.kind().as_str())
        .bind(role.record_id())
        .bind(expires_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create_token", e))?;

        row.into_access_token(plain_token)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    async fn find_token(&self, token: &str) -> Result<Option<AccessToken>, TravelError> {
        let token_hash = hash_token(token);

        let row: Option<TokenRow> = sqlx::query_as(
            r"SELECT role_kind, role_id, expires_at, created_at
               FROM access_tokens WHERE token_hash = ?",
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find_token", e))?;

        // Stored value is the hash; callers only ever see the plaintext once,
        // at creation.
        row.map(|r| r.into_access_token(token_hash)).transpose()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    async fn revoke_token(&self, token: &str) -> Result<(), TravelError> {
        let token_hash = hash_token(token);

        sqlx::query("DELETE FROM access_tokens WHERE token_hash = ?")
            .bind(&token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("revoke_token", e))?;

        Ok(())
    }
}
