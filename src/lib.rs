//! # Session Timer Bot
//!
//! A webhook-driven Telegram bot that tracks a declared session length and
//! reminds the chat shortly before it ends.
//!
//! ## Features
//! - `/start_session <minutes>` starts (or replaces) the chat's session
//! - Reminders at 10 and 5 minutes left, plus an end-of-session notice
//! - Restarting a session silently retires the old session's reminders
//! - In-memory state only; idle between updates and reminder firings

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Error types
pub mod error;
/// Sessions and reminders
pub mod models;
/// Session registry, reminder scheduling, timer, notifier and health services
pub mod services;
/// Utility functions for datetime, validation, feedback and logging
pub mod utils;
