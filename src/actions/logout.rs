use crate::repository::TokenRepository;
use crate::TravelError;

/// Revokes the caller's bearer token.
pub struct LogoutAction<T> {
    tokens: T,
}

impl<T: TokenRepository> LogoutAction<T> {
    pub fn new(tokens: T) -> Self {
        LogoutAction { tokens }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all, err)
    )]
    pub async fn execute(&self, token: &str) -> Result<(), TravelError> {
        self.tokens.revoke_token(token).await?;

        log::info!(target: "waypoint", "msg=\"logout success\"");
        Ok(())
    }
}
