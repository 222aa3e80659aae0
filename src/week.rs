use crate::storage::KeyValueStore;
use chrono::{DateTime, Duration, Utc};

pub const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;
const DAY_MILLIS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

pub fn week_start_key(user_id: &str) -> String {
    format!("week_start:{user_id}")
}

/// Reads the stored week start for `user_id`. Unparsable values read as absent.
pub fn stored_week_start(store: &impl KeyValueStore, user_id: &str) -> Option<DateTime<Utc>> {
    let raw = store.get(&week_start_key(user_id))?;
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(at) => Some(at.with_timezone(&Utc)),
        Err(err) => {
            tracing::warn!(user_id, "ignoring malformed week marker {raw:?}: {err}");
            None
        }
    }
}

/// Elapsed time as fractional days. Negative when the marker is in the future.
pub fn elapsed_days(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - start).num_milliseconds() as f64 / DAY_MILLIS
}

pub fn is_expired(marker: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match marker {
        None => true,
        Some(start) => elapsed_days(start, now) >= 7.0,
    }
}

pub fn is_week_expired(store: &impl KeyValueStore, user_id: &str, now: DateTime<Utc>) -> bool {
    is_expired(stored_week_start(store, user_id), now)
}

/// Marks `now` as the start of the tracking week. Callers clear the checklist alongside.
pub fn start_new_week(store: &mut impl KeyValueStore, user_id: &str, now: DateTime<Utc>) {
    store.set(&week_start_key(user_id), now.to_rfc3339());
}

pub fn week_ends_at(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::seconds(WEEK_SECONDS)
}

/// Whole days left before the next rollover, rounded up, never negative.
pub fn days_remaining(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let left = 7.0 - elapsed_days(start, now);
    if left <= 0.0 { 0 } else { left.ceil() as i64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn missing_marker_is_expired() {
        let store = LocalStore::default();
        assert!(is_week_expired(&store, "alex", base()));
    }

    #[test]
    fn exactly_seven_days_is_expired() {
        let start = base();
        assert!(is_expired(Some(start), start + Duration::days(7)));
    }

    #[test]
    fn just_under_seven_days_is_not_expired() {
        let start = base();
        let now = start + Duration::milliseconds((6.999 * DAY_MILLIS) as i64);
        assert!(!is_expired(Some(start), now));
    }

    #[test]
    fn future_marker_is_not_expired() {
        let start = base();
        assert!(!is_expired(Some(start), start - Duration::hours(3)));
    }

    #[test]
    fn corrupt_marker_reads_as_expired() {
        let mut store = LocalStore::default();
        store.set(&week_start_key("alex"), "last tuesday".into());
        assert_eq!(stored_week_start(&store, "alex"), None);
        assert!(is_week_expired(&store, "alex", base()));
    }

    #[test]
    fn start_new_week_round_trips_through_store() {
        let mut store = LocalStore::default();
        start_new_week(&mut store, "alex", base());
        assert_eq!(stored_week_start(&store, "alex"), Some(base()));
        assert!(!is_week_expired(&store, "alex", base() + Duration::days(3)));
        assert!(is_week_expired(&store, "jordan", base()));
    }

    #[test]
    fn days_remaining_counts_down() {
        let start = base();
        assert_eq!(days_remaining(start, start), 7);
        assert_eq!(days_remaining(start, start + Duration::hours(36)), 6);
        assert_eq!(days_remaining(start, start + Duration::days(9)), 0);
        assert_eq!(week_ends_at(start), start + Duration::days(7));
    }
}
