//! Service configuration.
//!
//! Everything that would otherwise be a hardcoded constant: token lifetime,
//! token length, and the sender address stamped on notification emails.
//! `WaypointConfig::default()` gives sensible defaults.

use chrono::Duration;

use crate::crypto::DEFAULT_TOKEN_LENGTH;

/// Configuration for the waypoint service.
#[derive(Debug, Clone)]
pub struct WaypointConfig {
    /// Lifetime of access tokens issued at login.
    pub token_expiry: Duration,

    /// Length of generated tokens in characters. Minimum recommended is 32.
    pub token_length: usize,

    /// Sender address used for notification emails.
    pub mail_from: String,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            token_expiry: Duration::days(7),
            token_length: DEFAULT_TOKEN_LENGTH,
            mail_from: "noreply@waypoint.local".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WaypointConfig::default();
        assert_eq!(config.token_expiry, Duration::days(7));
        assert_eq!(config.token_length, 32);
        assert!(!config.mail_from.is_empty());
    }
}
