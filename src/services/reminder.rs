use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::{ReminderPolicy, ScheduledReminder, Session};
use crate::services::notifier::Notifier;
use crate::services::registry::{NoticeClaim, SessionRegistry};
use crate::services::timer::{DelayedAction, TimerFacility};
use crate::utils::logging::log_reminder_event;

/// What happened when a delayed reminder came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// The session was still live and the message was sent.
    Delivered,
    /// The session was restarted after the reminder was scheduled.
    Superseded,
    /// This notice was already sent for the live session; nothing was sent.
    AlreadyDelivered,
    /// The session was live but sending failed; the failure was logged.
    DeliveryFailed,
}

/// Arranges the delayed notifications of a session.
///
/// Cancellation is logical: a restart bumps the chat's generation in the
/// [`SessionRegistry`], and every delayed action checks its own generation
/// when it fires. Nothing is ever aborted.
pub struct ReminderScheduler {
    registry: Arc<SessionRegistry>,
    notifier: Arc<dyn Notifier>,
    timer: Arc<dyn TimerFacility>,
    policy: ReminderPolicy,
    session_end_notice: bool,
}

impl ReminderScheduler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        notifier: Arc<dyn Notifier>,
        timer: Arc<dyn TimerFacility>,
        policy: ReminderPolicy,
    ) -> Self {
        Self {
            registry,
            notifier,
            timer,
            policy,
            session_end_notice: true,
        }
    }

    /// Enables or disables the notice sent when a session ends.
    pub fn with_session_end_notice(mut self, enabled: bool) -> Self {
        self.session_end_notice = enabled;
        self
    }

    pub fn policy(&self) -> &ReminderPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Registers the reminders of `session` with the timer and returns the
    /// ones that were registered.
    ///
    /// Never blocks on delivery. Registration failures are logged and the
    /// affected reminder is left out of the result.
    pub async fn arrange_reminders(&self, session: &Session) -> Vec<ScheduledReminder> {
        let mut arranged = Vec::new();
        for reminder in self.policy.plan(session) {
            if self.register(reminder.clone()).await {
                arranged.push(reminder);
            }
        }
        arranged
    }

    /// Registers the end-of-session notice, if enabled.
    pub async fn arrange_session_end(&self, session: &Session) -> Option<ScheduledReminder> {
        if !self.session_end_notice {
            return None;
        }
        let notice = self.policy.session_end(session);
        self.register(notice.clone()).await.then_some(notice)
    }

    async fn register(&self, reminder: ScheduledReminder) -> bool {
        let registry = self.registry.clone();
        let notifier = self.notifier.clone();
        let fire_at = reminder.fire_at;
        let chat_id = reminder.chat_id;
        let kind = reminder.kind;

        // The action owns its (chat, generation) snapshot; it never reads the
        // session record it was created from.
        let action: DelayedAction = Box::new(move || {
            Box::pin(async move {
                fire_reminder(&registry, notifier.as_ref(), &reminder).await;
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        });

        match self.timer.schedule_at(fire_at, action).await {
            Ok(()) => {
                tracing::debug!("Scheduled {:?} notice for chat {} at {}", kind, chat_id, fire_at);
                true
            }
            Err(e) => {
                tracing::error!("Failed to schedule {:?} notice for chat {}: {}", kind, chat_id, e);
                false
            }
        }
    }
}

/// Body of every delayed action: deliver `reminder` if its generation is
/// still live and it has not been delivered yet.
pub async fn fire_reminder(
    registry: &SessionRegistry,
    notifier: &dyn Notifier,
    reminder: &ScheduledReminder,
) -> FireOutcome {
    match registry.claim_notice(reminder.chat_id, reminder.generation, reminder.kind) {
        NoticeClaim::Superseded => {
            log_reminder_event("superseded", reminder, None);
            FireOutcome::Superseded
        }
        NoticeClaim::AlreadyDelivered => {
            log_reminder_event("duplicate", reminder, None);
            FireOutcome::AlreadyDelivered
        }
        NoticeClaim::Live => match notifier.send_message(reminder.chat_id, &reminder.message()).await {
            Ok(()) => {
                log_reminder_event("fired", reminder, None);
                FireOutcome::Delivered
            }
            Err(e) => {
                log_reminder_event("failed", reminder, Some(&e.to_string()));
                FireOutcome::DeliveryFailed
            }
        },
    }
}
