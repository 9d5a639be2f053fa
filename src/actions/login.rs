use chrono::{Duration, Utc};

use crate::crypto::verify_password;
use crate::repository::{AccessToken, DirectoryRepository, TokenRepository};
use crate::role::{Role, RoleKind};
use crate::secret::SecretString;
use crate::{TravelError, WaypointConfig};

/// Authenticates an account of one specific role and issues a bearer token.
///
/// Login endpoints are namespace-scoped, so the expected role is an input:
/// an employee's credentials presented at the manager login fail with
/// `InvalidCredentials`, exactly like a wrong password.
pub struct LoginAction<D, T> {
    directory: D,
    tokens: T,
    token_expiry: Duration,
}

impl<D: DirectoryRepository, T: TokenRepository> LoginAction<D, T> {
    pub fn new(directory: D, tokens: T) -> Self {
        LoginAction {
            directory,
            tokens,
            token_expiry: WaypointConfig::default().token_expiry,
        }
    }

    /// Overrides the default token lifetime, usually with
    /// [`WaypointConfig::token_expiry`].
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.token_expiry = expiry;
        self
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(
        &self,
        kind: RoleKind,
        username: &str,
        password: &SecretString,
    ) -> Result<AccessToken, TravelError> {
        let (role, hashed) = match kind {
            RoleKind::Admin => match self.directory.find_admin_by_username(username).await? {
                Some(admin) => (Role::Admin(admin.id), admin.hashed_password),
                None => return Err(TravelError::InvalidCredentials),
            },
            RoleKind::Manager => match self.directory.find_manager_by_username(username).await? {
                Some(manager) => (Role::Manager(manager.id), manager.hashed_password),
                None => return Err(TravelError::InvalidCredentials),
            },
            RoleKind::Employee => {
                match self.directory.find_employee_by_username(username).await? {
                    Some(employee) => (Role::Employee(employee.id), employee.hashed_password),
                    None => return Err(TravelError::InvalidCredentials),
                }
            }
        };

        if !verify_password(password.expose_secret(), &hashed)? {
            log::warn!(
                target: "waypoint",
                "msg=\"login failed\", role=\"{}\", username=\"{username}\"",
                kind.as_str()
            );
            return Err(TravelError::InvalidCredentials);
        }

        let expires_at = Utc::now() + self.token_expiry;
        let token = self.tokens.create_token(role, expires_at).await?;

        log::info!(
            target: "waypoint",
            "msg=\"login success\", role=\"{}\", username=\"{username}\"",
            kind.as_str()
        );

        Ok(token)
    }
}
