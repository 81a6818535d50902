//! Time-based validity rule for cached snapshots

use chrono::{DateTime, Duration, Utc};

/// Number of days a snapshot stays usable
pub const MAX_CACHE_AGE_DAYS: i64 = 7;

/// Decides whether a cached snapshot is still fresh enough to serve
pub struct CachePolicy;

impl CachePolicy {
    /// Returns the maximum age a snapshot may reach before it expires
    pub fn max_age() -> Duration {
        Duration::days(MAX_CACHE_AGE_DAYS)
    }

    /// Returns true while `against` is strictly before `timestamp + max_age`
    ///
    /// A snapshot that is exactly `max_age` old is already expired.
    pub fn validate(timestamp: DateTime<Utc>, against: DateTime<Utc>) -> bool {
        match timestamp.checked_add_signed(Self::max_age()) {
            Some(expires_at) => against < expires_at,
            None => false,
        }
    }
}
