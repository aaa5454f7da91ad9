//! Single source of truth for which session, if any, is live in each chat.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use teloxide::types::ChatId;

use crate::error::SessionError;
use crate::models::{ReminderKind, Session};

/// Outcome of [`SessionRegistry::claim_notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeClaim {
    /// The generation is current and the notice had not been delivered yet.
    Live,
    /// A newer session replaced the one that scheduled the notice.
    Superseded,
    /// The notice was already claimed for this generation.
    AlreadyDelivered,
}

#[derive(Debug)]
struct Entry {
    session: Session,
    delivered: HashSet<ReminderKind>,
}

/// In-memory mapping from chat to its current session.
///
/// A single lock guards the whole table; every read a firing reminder does
/// goes through the same lock as `start_session`, so it never sees a
/// half-applied restart.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    entries: Mutex<HashMap<ChatId, Entry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChatId, Entry>> {
        // Entries are replaced whole, so a poisoned table is still consistent.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Starts (or restarts) the session for `chat_id`, stamped with the
    /// current time.
    pub fn start_session(&self, chat_id: ChatId, duration_minutes: i64) -> Result<Session, SessionError> {
        self.start_session_at(chat_id, duration_minutes, Utc::now())
    }

    /// Same as [`start_session`](Self::start_session) with an explicit start
    /// time.
    pub fn start_session_at(
        &self,
        chat_id: ChatId,
        duration_minutes: i64,
        start_time: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        if duration_minutes <= 0 {
            return Err(SessionError::invalid_duration(
                duration_minutes.to_string(),
                "duration must be a positive number of minutes",
            ));
        }
        let duration_minutes = u32::try_from(duration_minutes).map_err(|_| {
            SessionError::invalid_duration(
                duration_minutes.to_string(),
                format!("duration exceeds the supported maximum of {} minutes", u32::MAX),
            )
        })?;

        let mut entries = self.lock();
        let generation = entries
            .get(&chat_id)
            .map_or(0, |entry| entry.session.generation)
            + 1;
        let session = Session {
            chat_id,
            duration_minutes,
            start_time,
            generation,
        };
        entries.insert(
            chat_id,
            Entry {
                session: session.clone(),
                delivered: HashSet::new(),
            },
        );

        tracing::debug!(
            "Session generation {} started in chat {} for {} minutes",
            generation,
            chat_id,
            duration_minutes
        );
        Ok(session)
    }

    /// Current generation for `chat_id`, or 0 if it never started a session.
    pub fn get_current_generation(&self, chat_id: ChatId) -> u64 {
        self.lock()
            .get(&chat_id)
            .map_or(0, |entry| entry.session.generation)
    }

    /// True iff `generation` is the chat's current generation.
    pub fn is_live(&self, chat_id: ChatId, generation: u64) -> bool {
        self.lock()
            .get(&chat_id)
            .is_some_and(|entry| entry.session.generation == generation)
    }

    /// Snapshot of the chat's current session.
    pub fn current_session(&self, chat_id: ChatId) -> Option<Session> {
        self.lock().get(&chat_id).map(|entry| entry.session.clone())
    }

    /// Checks liveness and records delivery of `kind` in one step.
    pub fn claim_notice(&self, chat_id: ChatId, generation: u64, kind: ReminderKind) -> NoticeClaim {
        let mut entries = self.lock();
        match entries.get_mut(&chat_id) {
            Some(entry) if entry.session.generation == generation => {
                if entry.delivered.insert(kind) {
                    NoticeClaim::Live
                } else {
                    NoticeClaim::AlreadyDelivered
                }
            }
            _ => NoticeClaim::Superseded,
        }
    }

    /// Number of chats whose session has not reached its nominal end.
    pub fn active_sessions(&self, now: DateTime<Utc>) -> usize {
        self.lock()
            .values()
            .filter(|entry| entry.session.end_time() > now)
            .count()
    }
}
