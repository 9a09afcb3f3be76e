use chrono::{DateTime, Duration, SecondsFormat, Utc};

pub fn time_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn time_plus_days(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Unparseable timestamps count as past, so a corrupt expiry fails closed.
pub fn is_past(timestamp: &str) -> bool {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(ts) => ts.with_timezone(&Utc) < Utc::now(),
        Err(_) => true,
    }
}
