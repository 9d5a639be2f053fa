use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use super::error::AppError;
use super::routes::AppState;
use crate::role::{Principal, Role};
use crate::{DirectoryRepository, Notifier, TicketRepository, TokenRepository, TravelError};

/// Validates the bearer token from the `Authorization` header and resolves
/// the owning directory record into a [`Principal`].
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal<D, T>
where
    D: DirectoryRepository,
    T: TokenRepository,
{
    principal: Principal,
    _marker: PhantomData<(D, T)>,
}

impl<D, T> AuthenticatedPrincipal<D, T>
where
    D: DirectoryRepository,
    T: TokenRepository,
{
    pub fn into_inner(self) -> Principal {
        self.principal
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(ToOwned::to_owned)
}

impl<D, K, T, N> FromRequestParts<AppState<D, K, T, N>> for AuthenticatedPrincipal<D, T>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<D, K, T, N>,
    ) -> Result<Self, Self::Rejection> {
        let token =
            extract_bearer_token(&parts.headers).ok_or(AppError(TravelError::TokenInvalid))?;

        let access_token = state
            .tokens
            .find_token(&token)
            .await
            .map_err(AppError)?
            .ok_or(AppError(TravelError::TokenInvalid))?;

        if access_token.expires_at < chrono::Utc::now() {
            return Err(AppError(TravelError::TokenExpired));
        }

        // A token whose directory record has vanished is as good as revoked.
        let principal = match access_token.role {
            Role::Admin(id) => {
                let admin = state
                    .directory
                    .find_admin_by_id(id)
                    .await
                    .map_err(AppError)?
                    .ok_or(AppError(TravelError::TokenInvalid))?;
                Principal {
                    role: access_token.role,
                    username: admin.username,
                    email: None,
                }
            }
            Role::Manager(id) => {
                let manager = state
                    .directory
                    .find_manager_by_id(id)
                    .await
                    .map_err(AppError)?
                    .ok_or(AppError(TravelError::TokenInvalid))?;
                Principal {
                    role: access_token.role,
                    username: manager.username,
                    email: Some(manager.email),
                }
            }
            Role::Employee(id) => {
                let employee = state
                    .directory
                    .find_employee_by_id(id)
                    .await
                    .map_err(AppError)?
                    .ok_or(AppError(TravelError::TokenInvalid))?;
                Principal {
                    role: access_token.role,
                    username: employee.username,
                    email: Some(employee.email),
                }
            }
        };

        Ok(AuthenticatedPrincipal {
            principal,
            _marker: PhantomData,
        })
    }
}
