//! Error types shared by the session registry, the reminder scheduler and
//! the Telegram collaborators.

use teloxide::types::ChatId;
use thiserror::Error;

/// Errors raised when starting a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The requested duration was missing, unparsable or not positive.
    #[error("invalid duration '{input}': {reason}")]
    InvalidDuration {
        /// The raw text (or number) the user supplied.
        input: String,
        /// Human readable explanation.
        reason: String,
    },
}

impl SessionError {
    pub(crate) fn invalid_duration(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a [`Notifier`](crate::services::notifier::Notifier).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The message could not be delivered to the chat.
    #[error("failed to deliver message to chat {chat_id}: {reason}")]
    DeliveryFailed {
        /// Destination chat.
        chat_id: ChatId,
        /// Underlying transport error, rendered.
        reason: String,
    },
}

/// Errors raised by a [`TimerFacility`](crate::services::timer::TimerFacility).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The delayed action could not be registered.
    #[error("failed to register delayed action: {0}")]
    Registration(String),
    /// The underlying scheduler could not be created, started or stopped.
    #[error("timer scheduler error: {0}")]
    Scheduler(String),
}
