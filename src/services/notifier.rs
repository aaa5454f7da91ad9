use async_trait::async_trait;
use teloxide::prelude::*;

use crate::error::NotifyError;

/// Sends plain text to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), NotifyError>;
}

/// [`Notifier`] backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(chat_id, text)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::DeliveryFailed {
                chat_id,
                reason: e.to_string(),
            })
    }
}
