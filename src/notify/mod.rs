//! Best-effort email notifications.
//!
//! Review transitions notify the affected employee. Delivery is
//! fire-and-forget: a [`Notifier`] failure is logged and the already-written
//! state change stands. Actions go through [`send_best_effort`] so no
//! notifier error can ever propagate into a transition result.

use async_trait::async_trait;

use crate::{TravelError, WaypointConfig};

/// An outbound notification email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery seam for notification emails.
///
/// Implement this to wire in a real mail transport. The default
/// [`LogNotifier`] only logs.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), TravelError>;
}

/// Sends a notification, swallowing (and logging) any failure.
pub async fn send_best_effort<N: Notifier>(notifier: &N, message: EmailMessage) {
    if let Err(err) = notifier.send(&message).await {
        log::warn!(
            target: "waypoint",
            "msg=\"notification failed\", to=\"{}\", subject=\"{}\", error=\"{err}\"",
            message.to,
            message.subject
        );
    }
}

/// Logs outbound mail instead of delivering it.
///
/// The sender address is fixed at construction; a real transport would use
/// it as the SMTP `From`.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender: String,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `sender` as the From address, usually
    /// [`WaypointConfig::mail_from`].
    pub fn with_sender(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self {
            sender: WaypointConfig::default().mail_from,
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), TravelError> {
        log::info!(
            target: "waypoint",
            "msg=\"email sent\", from=\"{}\", to=\"{}\", subject=\"{}\"",
            self.sender,
            message.to,
            message.subject
        );
        Ok(())
    }
}

/// Records sent mail for assertions; can be told to fail every send.
#[cfg(any(test, feature = "mocks"))]
#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: std::sync::Arc<std::sync::Mutex<Vec<EmailMessage>>>,
    pub fail: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

#[cfg(any(test, feature = "mocks"))]
impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `send` fail.
    pub fn fail_deliveries(&self) {
        self.fail.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    #[allow(clippy::unwrap_used)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[cfg(any(test, feature = "mocks"))]
#[async_trait]
impl Notifier for MockNotifier {
    #[allow(clippy::unwrap_used)]
    async fn send(&self, message: &EmailMessage) -> Result<(), TravelError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(TravelError::NotificationFailed(
                "mock delivery failure".to_owned(),
            ));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_notifier_records() {
        let notifier = MockNotifier::new();
        let message = EmailMessage {
            to: "emp@example.com".to_owned(),
            subject: "Ticket Approved".to_owned(),
            body: "Your ticket with ID 1 has been approved.".to_owned(),
        };

        send_best_effort(&notifier, message.clone()).await;
        assert_eq!(notifier.sent_count(), 1);
        assert_eq!(notifier.sent.lock().unwrap()[0], message);
    }

    #[tokio::test]
    async fn test_log_notifier_sender_comes_from_configuration() {
        let config = WaypointConfig {
            mail_from: "travel-desk@example.com".to_owned(),
            ..WaypointConfig::default()
        };
        let notifier = LogNotifier::with_sender(config.mail_from.clone());

        assert_eq!(notifier.sender(), "travel-desk@example.com");
        assert_eq!(
            LogNotifier::new().sender(),
            WaypointConfig::default().mail_from
        );

        send_best_effort(
            &notifier,
            EmailMessage {
                to: "emp@example.com".to_owned(),
                subject: "Ticket Approved".to_owned(),
                body: "ok".to_owned(),
            },
        )
        .await;
    }

    #[tokio::test]
    async fn test_best_effort_swallows_failure() {
        let notifier = MockNotifier::new();
        notifier.fail_deliveries();

        // must not panic or propagate
        send_best_effort(
            &notifier,
            EmailMessage {
                to: "emp@example.com".to_owned(),
                subject: "Ticket Rejected".to_owned(),
                body: "rejected".to_owned(),
            },
        )
        .await;
        assert_eq!(notifier.sent_count(), 0);
    }
}
