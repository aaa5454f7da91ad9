pub mod reminder;
pub mod session;

pub use reminder::{ReminderKind, ReminderPolicy, ScheduledReminder};
pub use session::Session;
