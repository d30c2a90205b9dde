//! Retention-window expiry for reports.

use chrono::{DateTime, TimeDelta, Utc};

/// Default retention window: one day, in milliseconds.
pub const DEFAULT_RETENTION_MS: i64 = 86_400_000;

/// Hides reports whose creation time is older than a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    retention: TimeDelta,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new(TimeDelta::milliseconds(DEFAULT_RETENTION_MS))
    }
}

impl StalenessPolicy {
    /// Creates a policy with a custom retention window.
    #[must_use]
    pub const fn new(retention: TimeDelta) -> Self {
        Self { retention }
    }

    /// Creates a policy retaining reports for `hours` hours.
    #[must_use]
    pub fn from_hours(hours: u32) -> Self {
        Self::new(TimeDelta::hours(i64::from(hours)))
    }

    /// The configured retention window.
    #[must_use]
    pub const fn retention(&self) -> TimeDelta {
        self.retention
    }

    /// Returns `true` iff `now - created_at` strictly exceeds the window.
    ///
    /// A report whose creation time has not been assigned yet is never
    /// expired.
    #[must_use]
    pub fn is_expired(&self, created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        is_expired(created_at, now, self.retention)
    }
}

/// Returns `true` iff `now - created_at > retention`. Absent `created_at`
/// is never expired.
#[must_use]
pub fn is_expired(
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    retention: TimeDelta,
) -> bool {
    created_at.is_some_and(|created| now - created > retention)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::now;

    #[test]
    fn boundary_is_not_expired() {
        let created = now();
        let policy = StalenessPolicy::default();

        assert!(!policy.is_expired(
            Some(created),
            created + TimeDelta::milliseconds(86_400_000)
        ));
        assert!(policy.is_expired(
            Some(created),
            created + TimeDelta::milliseconds(86_400_001)
        ));
    }

    #[test]
    fn missing_created_at_fails_open() {
        let policy = StalenessPolicy::default();

        assert!(!policy.is_expired(None, now()));
        assert!(!policy.is_expired(None, now() + TimeDelta::days(365)));
    }

    #[test]
    fn future_created_at_is_not_expired() {
        let created = now() + TimeDelta::hours(1);
        assert!(!StalenessPolicy::default().is_expired(Some(created), now()));
    }

    #[test]
    fn custom_retention() {
        let policy = StalenessPolicy::from_hours(48);
        let created = now() - TimeDelta::hours(36);

        assert_eq!(policy.retention(), TimeDelta::hours(48));
        assert!(!policy.is_expired(Some(created), now()));
        assert!(StalenessPolicy::default().is_expired(Some(created), now()));
    }
}
