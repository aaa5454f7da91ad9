use std::num::IntErrorKind;

use crate::error::SessionError;

/// Parses the `/start_session` argument into a positive number of minutes.
///
/// Only a single whole number is accepted; surrounding whitespace is ignored.
///
/// # Example
/// ```
/// use session_timer_bot::utils::validation::parse_duration_minutes;
///
/// assert_eq!(parse_duration_minutes(" 30 ").unwrap(), 30);
/// assert!(parse_duration_minutes("abc").is_err());
/// ```
pub fn parse_duration_minutes(input: &str) -> Result<i64, SessionError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(SessionError::invalid_duration(input, "no duration given"));
    }

    if trimmed.split_whitespace().count() > 1 {
        return Err(SessionError::invalid_duration(
            input,
            "expected a single number of minutes",
        ));
    }

    let minutes: i64 = trimmed.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            SessionError::invalid_duration(input, "duration is out of range")
        }
        _ => SessionError::invalid_duration(input, "not a whole number"),
    })?;

    if minutes <= 0 {
        return Err(SessionError::invalid_duration(
            input,
            "duration must be a positive number of minutes",
        ));
    }

    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_duration_minutes("30").unwrap(), 30);
        assert_eq!(parse_duration_minutes("+7").unwrap(), 7);
        assert_eq!(parse_duration_minutes("\t1\n").unwrap(), 1);
    }

    #[test]
    fn test_parse_reason_for_missing() {
        match parse_duration_minutes("   ") {
            Err(SessionError::InvalidDuration { reason, .. }) => assert_eq!(reason, "no duration given"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
