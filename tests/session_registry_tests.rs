#![allow(clippy::unwrap_used)]

use chrono::{Duration, Utc};
use session_timer_bot::error::SessionError;
use session_timer_bot::services::registry::SessionRegistry;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_first_session_gets_generation_one() {
    let registry = SessionRegistry::new();
    let before = Utc::now();

    let session = assert_ok!(registry.start_session(ChatId(100), 30));

    assert_eq!(session.chat_id, ChatId(100));
    assert_eq!(session.duration_minutes, 30);
    assert_eq!(session.generation, 1);
    assert!(session.start_time >= before);
    assert_eq!(registry.get_current_generation(ChatId(100)), 1);
}

#[test]
fn test_restart_bumps_generation_and_replaces_session() {
    let registry = SessionRegistry::new();

    let first = registry.start_session(ChatId(100), 30).unwrap();
    let second = registry.start_session(ChatId(100), 15).unwrap();

    assert_eq!(second.generation, first.generation + 1);
    assert_eq!(registry.current_session(ChatId(100)), Some(second));
}

#[test]
fn test_is_live_flips_on_restart() {
    let registry = SessionRegistry::new();

    let first = registry.start_session(ChatId(5), 30).unwrap();
    assert!(registry.is_live(ChatId(5), first.generation));

    let second = registry.start_session(ChatId(5), 30).unwrap();
    assert!(!registry.is_live(ChatId(5), first.generation));
    assert!(registry.is_live(ChatId(5), second.generation));
}

#[test]
fn test_chats_are_tracked_independently() {
    let registry = SessionRegistry::new();

    let a = registry.start_session(ChatId(1), 30).unwrap();
    registry.start_session(ChatId(2), 30).unwrap();
    registry.start_session(ChatId(2), 30).unwrap();

    assert!(registry.is_live(ChatId(1), a.generation));
    assert_eq!(registry.get_current_generation(ChatId(1)), 1);
    assert_eq!(registry.get_current_generation(ChatId(2)), 2);
}

#[test]
fn test_invalid_duration_leaves_registry_unchanged() {
    let registry = SessionRegistry::new();
    let session = registry.start_session(ChatId(1), 20).unwrap();

    for bad in [0, -5, i64::from(u32::MAX) + 1] {
        let err = assert_err!(registry.start_session(ChatId(1), bad));
        assert!(matches!(err, SessionError::InvalidDuration { .. }));
    }

    assert_eq!(registry.get_current_generation(ChatId(1)), 1);
    assert_eq!(registry.current_session(ChatId(1)), Some(session));
    assert_eq!(registry.get_current_generation(ChatId(2)), 0);
    assert!(assert_err!(registry.start_session(ChatId(2), -1)).to_string().contains("-1"));
    assert_eq!(registry.get_current_generation(ChatId(2)), 0);
}

#[test]
fn test_duration_above_ceiling_names_the_limit() {
    let registry = SessionRegistry::new();

    assert_ok!(registry.start_session(ChatId(3), i64::from(u32::MAX)));
    match registry.start_session(ChatId(3), i64::from(u32::MAX) + 1) {
        Err(SessionError::InvalidDuration { input, reason }) => {
            assert_eq!(input, "4294967296");
            assert_eq!(reason, "duration exceeds the supported maximum of 4294967295 minutes");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(registry.get_current_generation(ChatId(3)), 1);
}

#[test]
fn test_start_session_at_uses_given_time() {
    let registry = SessionRegistry::new();
    let start = Utc::now() - Duration::minutes(3);

    let session = registry.start_session_at(ChatId(1), 10, start).unwrap();

    assert_eq!(session.start_time, start);
    assert_eq!(session.end_time(), start + Duration::minutes(10));
}

#[test]
fn test_concurrent_restarts_produce_unique_generations() {
    let registry = Arc::new(SessionRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                (0..25)
                    .map(|_| registry.start_session(ChatId(77), 30).unwrap().generation)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut generations: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    generations.sort_unstable();
    generations.dedup();

    assert_eq!(generations.len(), 200);
    assert_eq!(registry.get_current_generation(ChatId(77)), 200);
}
