//! Telemetry port.

use std::collections::BTreeMap;
use std::time::Duration;

/// Port for usage tracking and error reporting.
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsPort: Send + Sync {
    /// Records a named event.
    fn track(&self, event: &str, category: &str);

    /// Associates traits with a user id.
    fn identify(&self, user_id: &str, traits: &BTreeMap<String, String>);

    /// Records how long something took.
    fn track_time(&self, name: &str, elapsed: Duration);

    /// Reports a handled error.
    fn report(&self, error: &str);
}
