//! Lap time formatting and parsing
//!
//! Lap times travel as milliseconds (`milliseconds`) and as display text
//! (`time`, `meanTime`, `fastestTime`). Text comes in three shapes:
//! `M:SS.mmm`, `H:MM:SS.mmm` and a bare `SS.mmm`.

use std::time::Duration;

use crate::error::TransformError;

/// Render milliseconds as `M:SS.mmm` with unpadded minutes.
///
/// # Example output
/// - `65432` → `1:05.432`
/// - `5123` → `0:05.123`
/// - `3723004` → `62:03.004`
pub fn format_lap_time(milliseconds: u64) -> String {
    let minutes = milliseconds / 60_000;
    let seconds = (milliseconds % 60_000) / 1000;
    let millis = milliseconds % 1000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

/// Parse lap time text into a duration.
pub fn parse_lap_time(text: &str) -> Result<Duration, TransformError> {
    let invalid = || TransformError::InvalidDuration(text.to_string());
    let trimmed = text.trim();

    let parts: Vec<&str> = trimmed.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => ("0", "0", *s),
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    let hours = parse_whole(hours).ok_or_else(invalid)?;
    let minutes = parse_whole(minutes).ok_or_else(invalid)?;

    let (whole_seconds, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    let whole_seconds = parse_whole(whole_seconds).ok_or_else(invalid)?;
    let millis = parse_fraction(fraction).ok_or_else(invalid)?;

    // Seconds are always bounded; minutes only below an hours field.
    if whole_seconds >= 60 || (parts.len() == 3 && minutes >= 60) {
        return Err(invalid());
    }

    let total = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(whole_seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)?;
    Ok(Duration::from_millis(total))
}

/// Mean of the given lap times rendered `M:SS.mmm`, or `None` when empty.
///
/// Rounds to the nearest millisecond, halves up.
pub fn mean_lap_time<S: AsRef<str>>(times: &[S]) -> Result<Option<String>, TransformError> {
    if times.is_empty() {
        return Ok(None);
    }

    let mut total: u128 = 0;
    for time in times {
        total += parse_lap_time(time.as_ref())?.as_millis();
    }

    let count = times.len() as u128;
    let mean = (total + count / 2) / count;
    Ok(Some(format_lap_time(mean as u64)))
}

fn parse_whole(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

// Fractional seconds, right-padded to milliseconds. More than three digits is rejected.
fn parse_fraction(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return Some(0);
    }
    if digits.len() > 3 {
        return None;
    }
    let value = parse_whole(digits)?;
    Some(value * 10u64.pow(3 - digits.len() as u32))
}
