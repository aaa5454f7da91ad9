use teloxide::types::ChatId;
use tracing::{error, info, warn};

use crate::models::ScheduledReminder;

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: ChatId, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, user_id: u64, chat_id: ChatId, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, user_id: u64, chat_id: ChatId, error: &str) {
    error!(
        "CMD_ERROR: {} by {}({}) in chat {} - {}",
        command, user, user_id, chat_id, error
    );
}

/// Logs validation errors with consistent format
pub fn log_validation_error(command: &str, field: &str, value: &str, error: &str, chat_id: ChatId) {
    warn!(
        "VALIDATION_ERROR: {} - {} field '{}' invalid: {} - chat {}",
        command, field, value, error, chat_id
    );
}

/// Logs what a delayed reminder did when it came due
pub fn log_reminder_event(outcome: &str, reminder: &ScheduledReminder, details: Option<&str>) {
    match (outcome, details) {
        ("failed", d) => error!(
            "REMINDER: {:?} for chat {} gen {} failed - {}",
            reminder.kind,
            reminder.chat_id,
            reminder.generation,
            d.unwrap_or("unknown error")
        ),
        (outcome, Some(d)) => info!(
            "REMINDER: {:?} for chat {} gen {} {} - {}",
            reminder.kind, reminder.chat_id, reminder.generation, outcome, d
        ),
        (outcome, None) => info!(
            "REMINDER: {:?} for chat {} gen {} {}",
            reminder.kind, reminder.chat_id, reminder.generation, outcome
        ),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
