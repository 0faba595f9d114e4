use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rand::{Rng, distr::Alphanumeric};

/// Generates the random `state` parameter carried through the OAuth redirect
/// and verified when the callback arrives.
pub fn generate_state_param() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Parses a lower time bound from either an RFC 3339 timestamp or a plain
/// `YYYY-MM-DD` date (interpreted as midnight UTC).
pub fn parse_lower_bound(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())),
        Err(_) => Err(format!(
            "invalid time bound '{}': expected RFC 3339 or YYYY-MM-DD",
            value
        )),
    }
}

/// Default lower bound when none is given: one day before now.
pub fn default_lower_bound() -> DateTime<Utc> {
    Utc::now() - Duration::days(1)
}

/// Extracts a short "Artist A, Artist B" string from a raw track object.
pub fn track_artists(track: &serde_json::Value) -> String {
    track["artists"]
        .as_array()
        .map(|artists| {
            artists
                .iter()
                .filter_map(|a| a["name"].as_str())
                .collect::<Vec<&str>>()
                .join(", ")
        })
        .unwrap_or_default()
}
