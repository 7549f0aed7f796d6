//! Background notification dispatch.
//!
//! Views queue notifications (login activity, verification-code resend,
//! password-reset OTP delivery) and move on; delivery happens on a spawned
//! task against a [`NotificationSink`]. Dispatch is fire-and-forget:
//! delivery failures are logged, never surfaced to the HTTP response.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

/// Where a sign-in came from, echoed in login-activity notifications.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientDetails {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// A queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    LoginActivity {
        user_id: String,
        email: String,
        client: ClientDetails,
        at: DateTime<Utc>,
    },
    VerificationCode {
        user_id: String,
        email: String,
    },
    PasswordResetOtp {
        user_id: String,
        email: String,
        pin: String,
    },
}

impl Notification {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::LoginActivity { .. } => "login_activity",
            Notification::VerificationCode { .. } => "verification_code",
            Notification::PasswordResetOtp { .. } => "password_reset_otp",
        }
    }
}

/// Notification delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Delivers notifications to the outside world (mail, SMS, push).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Default sink: logs each delivery instead of sending anything.
pub struct LoggingSink;

#[async_trait]
impl NotificationSink for LoggingSink {
    async fn deliver(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(kind = notification.kind(), "delivering notification");
        Ok(())
    }
}

/// Hands notifications to the sink on a spawned task.
#[derive(Clone)]
pub struct TaskQueue {
    sink: Arc<dyn NotificationSink>,
}

impl TaskQueue {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Queue a notification for delivery and return immediately.
    pub fn dispatch(&self, notification: Notification) {
        let sink = self.sink.clone();
        let kind = notification.kind();
        tokio::spawn(async move {
            if let Err(e) = sink.deliver(notification).await {
                warn!(kind, error = %e, "notification delivery failed");
            }
        });
    }
}
