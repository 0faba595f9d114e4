use chrono::{Duration, Utc};
use serde_json::json;
use splaycli::utils::*;

#[test]
fn test_generate_state_param() {
    let state = generate_state_param();

    // Should be exactly 32 alphanumeric characters
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated values should be different
    let state2 = generate_state_param();
    assert_ne!(state, state2);
}

#[test]
fn test_parse_lower_bound_rfc3339() {
    let bound = parse_lower_bound("2024-05-01T12:30:00Z").unwrap();
    assert_eq!(bound.timestamp(), 1_714_566_600);

    // Offsets are normalized to UTC
    let offset = parse_lower_bound("2024-05-01T14:30:00+02:00").unwrap();
    assert_eq!(offset, bound);
}

#[test]
fn test_parse_lower_bound_date() {
    let bound = parse_lower_bound("2024-05-01").unwrap();
    assert_eq!(bound.to_rfc3339(), "2024-05-01T00:00:00+00:00");
}

#[test]
fn test_parse_lower_bound_invalid() {
    let result = parse_lower_bound("yesterday");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid time bound"));
}

#[test]
fn test_default_lower_bound_is_one_day_ago() {
    let bound = default_lower_bound();
    let expected = Utc::now() - Duration::days(1);
    let drift = (bound - expected).num_seconds().abs();
    assert!(drift < 5);
}

#[test]
fn test_track_artists() {
    let track = json!({
        "name": "Song",
        "artists": [{ "name": "First" }, { "name": "Second" }]
    });
    assert_eq!(track_artists(&track), "First, Second");

    let no_artists = json!({ "name": "Song" });
    assert_eq!(track_artists(&no_artists), "");
}
