use std::sync::Arc;
use teloxide::types::ChatId;

use crate::error::NotifyError;
use crate::services::notifier::Notifier;

/// Feedback types for different command outcomes
#[derive(Debug, Clone)]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Info,
}

impl FeedbackType {
    fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
        }
    }
}

/// Formats a feedback line the way every reply is rendered.
pub fn format_feedback(feedback_type: FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), message)
}

/// Centralized feedback for bot commands, sent through a [`Notifier`].
pub struct CommandFeedback {
    notifier: Arc<dyn Notifier>,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(notifier: Arc<dyn Notifier>, chat_id: ChatId) -> Self {
        Self { notifier, chat_id }
    }

    /// Send immediate feedback message
    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> Result<(), NotifyError> {
        self.notifier
            .send_message(self.chat_id, &format_feedback(feedback_type, message))
            .await
    }

    pub async fn success(&self, message: &str) -> Result<(), NotifyError> {
        self.send(FeedbackType::Success, message).await
    }

    pub async fn error(&self, message: &str) -> Result<(), NotifyError> {
        self.send(FeedbackType::Error, message).await
    }

    pub async fn warning(&self, message: &str) -> Result<(), NotifyError> {
        self.send(FeedbackType::Warning, message).await
    }

    pub async fn info(&self, message: &str) -> Result<(), NotifyError> {
        self.send(FeedbackType::Info, message).await
    }

    /// Send validation error with helpful suggestion
    pub async fn validation_error(&self, error: &str, suggestion: &str) -> Result<(), NotifyError> {
        let message = format!("{error}\n\n💡 Suggestion: {suggestion}");
        self.send(FeedbackType::Error, &message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_type_emojis() {
        assert_eq!(FeedbackType::Success.emoji(), "✅");
        assert_eq!(FeedbackType::Warning.emoji(), "⚠️");
        assert_eq!(FeedbackType::Error.emoji(), "❌");
        assert_eq!(FeedbackType::Info.emoji(), "ℹ️");
    }

    #[test]
    fn test_format_feedback() {
        assert_eq!(format_feedback(FeedbackType::Info, "hello"), "ℹ️ hello");
    }
}
