use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use super::HandlerResult;
use crate::bot::commands::{start_session::handle_start_session, Command, WELCOME_MESSAGE};
use crate::services::reminder::ReminderScheduler;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

pub async fn command_handler(
    msg: Message,
    cmd: Command,
    scheduler: Arc<ReminderScheduler>,
) -> HandlerResult {
    let (user, user_id) = msg
        .from
        .as_ref()
        .map(|u| (u.username.clone().unwrap_or_else(|| u.first_name.clone()), u.id.0))
        .unwrap_or_else(|| ("unknown".to_string(), 0));
    let name = command_name(&cmd);
    log_command_start(name, &user, user_id, msg.chat.id, None);

    match execute_command(&scheduler, msg.chat.id, cmd).await {
        Ok(details) => log_command_success(name, &user, user_id, msg.chat.id, details.as_deref()),
        Err(e) => log_command_error(name, &user, user_id, msg.chat.id, &e),
    }
    Ok(())
}

/// Runs `cmd` for `chat_id`. Returns log details on success and a rendered
/// error otherwise; user feedback has already been sent either way.
pub async fn execute_command(
    scheduler: &ReminderScheduler,
    chat_id: ChatId,
    cmd: Command,
) -> Result<Option<String>, String> {
    let notifier = scheduler.notifier();
    match cmd {
        Command::Help => notifier
            .send_message(chat_id, &Command::descriptions().to_string())
            .await
            .map(|_| None)
            .map_err(|e| e.to_string()),
        Command::Start => notifier
            .send_message(chat_id, WELCOME_MESSAGE)
            .await
            .map(|_| None)
            .map_err(|e| e.to_string()),
        Command::StartSession(args) => handle_start_session(scheduler, chat_id, &args)
            .await
            .map(|started| {
                Some(format!(
                    "generation {} for {} minutes, {} reminder(s)",
                    started.session.generation,
                    started.session.duration_minutes,
                    started.reminders.len()
                ))
            })
            .map_err(|e| e.to_string()),
    }
}

fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::Help => "help",
        Command::Start => "start",
        Command::StartSession(_) => "start_session",
    }
}
