use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::ErrorResponse;
use crate::TravelError;

/// Converts `TravelError` into appropriate HTTP responses.
#[derive(Debug)]
pub struct AppError(pub TravelError);

impl From<TravelError> for AppError {
    fn from(err: TravelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse::from(self.0.clone());
        let status = match &self.0 {
            TravelError::Validation(_)
            | TravelError::PreconditionFailed(_)
            | TravelError::UsernameTaken => StatusCode::BAD_REQUEST,
            TravelError::InvalidCredentials
            | TravelError::TokenInvalid
            | TravelError::TokenExpired => StatusCode::UNAUTHORIZED,
            TravelError::Forbidden => StatusCode::FORBIDDEN,
            TravelError::NotFound => StatusCode::NOT_FOUND,
            TravelError::DatabaseError(_)
            | TravelError::PasswordHashError
            | TravelError::NotificationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(error_response)).into_response()
    }
}
