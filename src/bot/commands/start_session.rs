use teloxide::types::ChatId;

use super::START_SESSION_USAGE;
use crate::error::SessionError;
use crate::models::{ScheduledReminder, Session};
use crate::services::reminder::ReminderScheduler;
use crate::utils::datetime::{format_datetime, format_time};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_validation_error;
use crate::utils::validation::parse_duration_minutes;

/// Everything `/start_session` arranged for the new session.
#[derive(Debug, Clone)]
pub struct StartedSession {
    pub session: Session,
    pub reminders: Vec<ScheduledReminder>,
    pub session_end: Option<ScheduledReminder>,
}

/// Parses `args`, (re)starts the chat's session, arranges its notices and
/// acknowledges to the chat.
///
/// Invalid input is answered with a validation message and returned as
/// [`SessionError::InvalidDuration`]; the registry is left untouched. A failed
/// acknowledgement is only logged.
pub async fn handle_start_session(
    scheduler: &ReminderScheduler,
    chat_id: ChatId,
    args: &str,
) -> Result<StartedSession, SessionError> {
    let feedback = CommandFeedback::new(scheduler.notifier().clone(), chat_id);

    let started = match parse_duration_minutes(args)
        .and_then(|minutes| scheduler.registry().start_session(chat_id, minutes))
    {
        Ok(session) => session,
        Err(e) => {
            let SessionError::InvalidDuration { input, reason } = &e;
            log_validation_error("start_session", "minutes", input, reason, chat_id);
            let message = if input.trim().is_empty() {
                "Please tell me how long the session is, in minutes.".to_string()
            } else {
                format!("'{}' is not a valid duration: {}.", input.trim(), reason)
            };
            if let Err(send_err) = feedback.validation_error(&message, START_SESSION_USAGE).await {
                tracing::warn!("Could not send validation feedback: {}", send_err);
            }
            return Err(e);
        }
    };

    let reminders = scheduler.arrange_reminders(&started).await;
    let session_end = scheduler.arrange_session_end(&started).await;

    let ack = acknowledgement_text(&started, &reminders, session_end.is_some());
    let sent = if reminders.is_empty() {
        feedback.warning(&ack).await
    } else {
        feedback.success(&ack).await
    };
    if let Err(e) = sent {
        tracing::warn!("Could not acknowledge session in chat {}: {}", chat_id, e);
    }

    Ok(StartedSession {
        session: started,
        reminders,
        session_end,
    })
}

/// Acknowledgement for a freshly started session, listing the reminders
/// that were actually arranged.
pub fn acknowledgement_text(session: &Session, reminders: &[ScheduledReminder], session_end: bool) -> String {
    let end = session.end_time();
    let end_text = if end.date_naive() == session.start_time.date_naive() {
        format_time(&end)
    } else {
        format_datetime(&end)
    };
    let mut text = format!(
        "Tracking a {}-minute session (ends at {}).",
        session.duration_minutes, end_text
    );

    if reminders.is_empty() {
        text.push_str(" It is too short for reminders");
        text.push_str(if session_end {
            "; I'll only tell you when it ends."
        } else {
            "."
        });
    } else {
        let minutes: Vec<String> = reminders.iter().map(|r| r.minutes_left.to_string()).collect();
        text.push_str(&format!(
            " I'll remind you when {} minutes are left.",
            minutes.join(" and ")
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReminderPolicy;
    use chrono::{TimeZone, Utc};

    fn session(duration_minutes: u32, hour: u32) -> Session {
        Session {
            chat_id: ChatId(9),
            duration_minutes,
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            generation: 1,
        }
    }

    #[test]
    fn test_ack_lists_both_reminders() {
        let s = session(30, 12);
        let reminders = ReminderPolicy::default().plan(&s);
        assert_eq!(
            acknowledgement_text(&s, &reminders, true),
            "Tracking a 30-minute session (ends at 12:30 UTC). I'll remind you when 10 and 5 minutes are left."
        );
    }

    #[test]
    fn test_ack_for_single_reminder() {
        let s = session(7, 12);
        let reminders = ReminderPolicy::default().plan(&s);
        assert!(acknowledgement_text(&s, &reminders, true).ends_with("when 5 minutes are left."));
    }

    #[test]
    fn test_ack_for_too_short_session() {
        let s = session(3, 12);
        assert!(acknowledgement_text(&s, &[], true).contains("too short for reminders; I'll only tell you when it ends."));
        assert!(acknowledgement_text(&s, &[], false).ends_with("too short for reminders."));
    }

    #[test]
    fn test_ack_crossing_midnight_shows_date() {
        let s = session(120, 23);
        assert!(acknowledgement_text(&s, &[], true).contains("Thursday, May 02 at 01:00 UTC"));
    }
}
