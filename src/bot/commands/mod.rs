pub mod start_session;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Session Timer Bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Show a welcome message and usage")]
    Start,
    #[command(description = "Start a session of <minutes>, with reminders at 10 and 5 minutes left")]
    StartSession(String),
}

/// Text for `/start`.
pub const WELCOME_MESSAGE: &str = "⏱️ Welcome to Session Timer Bot!\n\n\
Use /start_session <minutes> to start tracking a session.\n\
For example, /start_session 30 starts a 30-minute countdown and reminds you \
when 10 and 5 minutes are left.\n\n\
Starting a new session replaces the current one.";

/// Suggestion attached to every duration validation error.
pub const START_SESSION_USAGE: &str = "Use /start_session <minutes>, for example /start_session 30";
