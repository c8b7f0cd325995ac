use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch; 0 if the clock is set before it
pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Seconds since `last_seen`. A clock step backwards counts as no idle time.
pub fn idle_seconds(last_seen: i64, now: i64) -> i64 {
    (now - last_seen).max(0)
}

/// Idle for strictly longer than `timeout` seconds
pub fn is_expired(last_seen: i64, timeout: i64, now: i64) -> bool {
    idle_seconds(last_seen, now) > timeout
}
