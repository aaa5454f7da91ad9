#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use session_timer_bot::error::{NotifyError, TimerError};
use session_timer_bot::models::ReminderPolicy;
use session_timer_bot::services::notifier::Notifier;
use session_timer_bot::services::registry::SessionRegistry;
use session_timer_bot::services::reminder::ReminderScheduler;
use session_timer_bot::services::timer::{DelayedAction, TimerFacility};
use std::sync::{Arc, Mutex};
use teloxide::types::ChatId;

/// Timer that only records registrations; tests fire them explicitly.
#[derive(Default)]
pub struct ManualTimer {
    pending: Mutex<Vec<(DateTime<Utc>, DelayedAction)>>,
    fail: Mutex<bool>,
}

impl ManualTimer {
    pub fn fail_registrations(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    /// Fire times still pending, in firing order.
    pub fn pending_times(&self) -> Vec<DateTime<Utc>> {
        let mut times: Vec<_> = self.pending.lock().unwrap().iter().map(|(t, _)| *t).collect();
        times.sort();
        times
    }

    /// Runs every action due at or before `until`, earliest first. Returns
    /// how many ran.
    pub async fn fire_until(&self, until: DateTime<Utc>) -> usize {
        let mut due = {
            let mut pending = self.pending.lock().unwrap();
            let (due, rest): (Vec<_>, Vec<_>) = pending.drain(..).partition(|(t, _)| *t <= until);
            *pending = rest;
            due
        };
        due.sort_by_key(|(t, _)| *t);
        let count = due.len();
        for (_, action) in due {
            action().await;
        }
        count
    }
}

#[async_trait]
impl TimerFacility for ManualTimer {
    async fn schedule_at(&self, fire_at: DateTime<Utc>, action: DelayedAction) -> Result<(), TimerError> {
        if *self.fail.lock().unwrap() {
            return Err(TimerError::Registration("timer offline".to_string()));
        }
        self.pending.lock().unwrap().push((fire_at, action));
        Ok(())
    }
}

/// Notifier that records every message and can be told to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(ChatId, String)>>,
    failures_left: Mutex<usize>,
}

impl RecordingNotifier {
    /// Makes the next `count` sends fail.
    pub fn fail_next(&self, count: usize) {
        *self.failures_left.lock().unwrap() = count;
    }

    pub fn messages(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts_for(&self, chat_id: ChatId) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(id, _)| *id == chat_id)
            .map(|(_, text)| text)
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), NotifyError> {
        {
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(NotifyError::DeliveryFailed {
                    chat_id,
                    reason: "network unreachable".to_string(),
                });
            }
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

pub struct Harness {
    pub registry: Arc<SessionRegistry>,
    pub notifier: Arc<RecordingNotifier>,
    pub timer: Arc<ManualTimer>,
    pub scheduler: Arc<ReminderScheduler>,
}

pub fn harness() -> Harness {
    harness_with(true)
}

pub fn harness_with(session_end_notice: bool) -> Harness {
    let registry = Arc::new(SessionRegistry::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let timer = Arc::new(ManualTimer::default());
    let scheduler = Arc::new(
        ReminderScheduler::new(
            registry.clone(),
            notifier.clone(),
            timer.clone(),
            ReminderPolicy::default(),
        )
        .with_session_end_notice(session_end_notice),
    );
    Harness {
        registry,
        notifier,
        timer,
        scheduler,
    }
}
