//! Telemetry adapter that records events through `tracing`.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::ports::AnalyticsPort;

/// Writes analytics events to the log under the `analytics` target.
///
/// Tracking calls are dropped when the user has disabled tracking; error
/// reports are always recorded.
#[derive(Debug, Clone, Default)]
pub struct TracingAnalytics {
    tracking_enabled: bool,
}

impl TracingAnalytics {
    #[must_use]
    pub const fn new(tracking_enabled: bool) -> Self {
        Self { tracking_enabled }
    }
}

impl AnalyticsPort for TracingAnalytics {
    fn track(&self, event: &str, category: &str) {
        if self.tracking_enabled {
            info!(target: "analytics", event, category, "track");
        }
    }

    fn identify(&self, user_id: &str, traits: &BTreeMap<String, String>) {
        if self.tracking_enabled {
            info!(target: "analytics", user_id, traits = ?traits.keys().collect::<Vec<_>>(), "identify");
        }
    }

    fn track_time(&self, name: &str, elapsed: Duration) {
        if self.tracking_enabled {
            info!(target: "analytics", name, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "timed");
        }
    }

    fn report(&self, error: &str) {
        warn!(target: "analytics", error, "report");
    }
}
