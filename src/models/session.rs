use chrono::{DateTime, Duration, Utc};
use teloxide::types::ChatId;

/// A tracked countdown for one chat.
///
/// `generation` grows by one every time the chat (re)starts a session; any
/// delayed action carrying an older generation is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub chat_id: ChatId,
    pub duration_minutes: u32,
    pub start_time: DateTime<Utc>,
    pub generation: u64,
}

impl Session {
    /// Nominal end of the session.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }
}
