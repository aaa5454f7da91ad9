use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use teloxide::types::ChatId;

use super::session::Session;

/// Which notice a delayed action delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    First,
    Second,
    /// Fires at the nominal end of the session.
    SessionEnd,
}

/// One delayed notification, identified by (chat, generation, kind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub chat_id: ChatId,
    pub generation: u64,
    pub kind: ReminderKind,
    /// Minutes left in the session when this fires.
    pub minutes_left: u32,
    pub total_minutes: u32,
    pub fire_at: DateTime<Utc>,
}

impl ScheduledReminder {
    /// Text sent to the chat when the reminder fires.
    pub fn message(&self) -> String {
        match self.kind {
            ReminderKind::First | ReminderKind::Second => format!(
                "⚠️ {} minutes left in your session ({} minutes total).",
                self.minutes_left, self.total_minutes
            ),
            ReminderKind::SessionEnd => format!(
                "⏰ Your {}-minute session has ended. Start a new one with /start_session.",
                self.total_minutes
            ),
        }
    }
}

/// How many minutes before the end each reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    first_minutes_left: u32,
    second_minutes_left: u32,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            first_minutes_left: 10,
            second_minutes_left: 5,
        }
    }
}

impl ReminderPolicy {
    pub fn new(first_minutes_left: u32, second_minutes_left: u32) -> Result<Self> {
        if second_minutes_left == 0 {
            return Err(anyhow!("Reminder offsets must be positive"));
        }
        if first_minutes_left <= second_minutes_left {
            return Err(anyhow!(
                "First reminder ({first_minutes_left} min) must come before the second ({second_minutes_left} min)"
            ));
        }
        Ok(Self {
            first_minutes_left,
            second_minutes_left,
        })
    }

    pub fn first_minutes_left(&self) -> u32 {
        self.first_minutes_left
    }

    pub fn second_minutes_left(&self) -> u32 {
        self.second_minutes_left
    }

    /// Reminders for `session`, in firing order.
    ///
    /// A reminder whose offset from the start would be negative is skipped,
    /// so sessions shorter than an offset get fewer reminders rather than an
    /// immediate one.
    pub fn plan(&self, session: &Session) -> Vec<ScheduledReminder> {
        [
            (ReminderKind::First, self.first_minutes_left),
            (ReminderKind::Second, self.second_minutes_left),
        ]
        .into_iter()
        .filter_map(|(kind, minutes_left)| {
            let offset = i64::from(session.duration_minutes) - i64::from(minutes_left);
            (offset >= 0).then(|| ScheduledReminder {
                chat_id: session.chat_id,
                generation: session.generation,
                kind,
                minutes_left,
                total_minutes: session.duration_minutes,
                fire_at: session.start_time + Duration::minutes(offset),
            })
        })
        .collect()
    }

    /// The end-of-session notice for `session`.
    pub fn session_end(&self, session: &Session) -> ScheduledReminder {
        ScheduledReminder {
            chat_id: session.chat_id,
            generation: session.generation,
            kind: ReminderKind::SessionEnd,
            minutes_left: 0,
            total_minutes: session.duration_minutes,
            fire_at: session.end_time(),
        }
    }
}
