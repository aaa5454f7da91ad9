use anyhow::{anyhow, Context, Result};
use std::env;
use url::Url;

use crate::models::ReminderPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub webhook_url: Url,
    pub http_port: u16,
    pub reminder_policy: ReminderPolicy,
    pub session_end_notice: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let webhook_url = env::var("WEBHOOK_URL")
            .map_err(|_| anyhow!("WEBHOOK_URL must be set"))?;
        let webhook_url = Url::parse(webhook_url.trim())
            .with_context(|| format!("Invalid WEBHOOK_URL '{webhook_url}'"))?;

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let first = minutes_var("FIRST_REMINDER_MINUTES", 10)?;
        let second = minutes_var("SECOND_REMINDER_MINUTES", 5)?;
        let reminder_policy = ReminderPolicy::new(first, second)?;

        let session_end_notice = match env::var("SESSION_END_NOTICE") {
            Ok(value) => parse_bool(&value)
                .ok_or_else(|| anyhow!("Invalid SESSION_END_NOTICE '{value}'"))?,
            Err(_) => true,
        };

        Ok(Config {
            telegram_bot_token: token,
            webhook_url,
            http_port,
            reminder_policy,
            session_end_notice,
        })
    }
}

fn minutes_var(name: &str, default: u32) -> Result<u32> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid {name}")),
        _ => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
