pub mod general_message;
pub mod message;

use std::sync::Arc;
use teloxide::{
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    prelude::*,
    types::Me,
};

use crate::bot::commands::Command;
use crate::services::reminder::ReminderScheduler;

/// Result type every endpoint returns to the dispatcher.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub struct BotHandler {
    pub scheduler: Arc<ReminderScheduler>,
}

impl BotHandler {
    pub fn new(scheduler: Arc<ReminderScheduler>) -> Self {
        Self { scheduler }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let scheduler = self.scheduler.clone();
        let scheduler_text = self.scheduler.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |msg: Message, cmd: Command| {
                        let scheduler = scheduler.clone();
                        async move { message::command_handler(msg, cmd, scheduler).await }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |msg: Message, me: Me| {
                let scheduler = scheduler_text.clone();
                async move { general_message::handle_general_message(msg, me, scheduler).await }
            }))
    }
}
