use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Me;

use super::HandlerResult;
use crate::error::NotifyError;
use crate::services::reminder::ReminderScheduler;
use crate::utils::feedback::CommandFeedback;

pub async fn handle_general_message(msg: Message, me: Me, scheduler: Arc<ReminderScheduler>) -> HandlerResult {
    if let Some(text) = msg.text() {
        if let Err(e) = respond_to_text(&scheduler, msg.chat.id, text, me.username()).await {
            tracing::warn!("Could not reply to message in chat {}: {}", msg.chat.id, e);
        }
    }
    Ok(())
}

/// Replies to text that is not a recognised command. Ordinary chatter and
/// commands addressed to other bots are ignored to avoid spam.
pub async fn respond_to_text(
    scheduler: &ReminderScheduler,
    chat_id: ChatId,
    text: &str,
    bot_username: &str,
) -> Result<(), NotifyError> {
    let feedback = CommandFeedback::new(scheduler.notifier().clone(), chat_id);
    let lowered = text.to_lowercase();

    if text.starts_with('/') {
        let token = text.split_whitespace().next().unwrap_or(text);
        let (command, addressee) = match token.split_once('@') {
            Some((command, addressee)) => (command, Some(addressee)),
            None => (token, None),
        };
        if addressee.is_some_and(|name| !name.eq_ignore_ascii_case(bot_username)) {
            return Ok(());
        }
        let error_msg = format!("Unknown command: {command}");
        feedback
            .validation_error(&error_msg, "Use /help to see all available commands.")
            .await
    } else if lowered.contains("session") || lowered.contains("timer") {
        feedback
            .info("Looking to track a session? Try /start_session 30, or use /help for more.")
            .await
    } else if lowered.contains("help") {
        feedback.info("Use /help to see all available commands!").await
    } else {
        Ok(())
    }
}
