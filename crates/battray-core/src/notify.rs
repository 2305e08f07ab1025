//! Notification gating with repeat suppression.
//!
//! The classifier re-fires the same category on every refresh tick while the
//! battery hovers at a threshold. The gate keeps the last delivered category
//! and timestamp and declines duplicates inside a fixed window, so the user
//! is re-alerted for a sustained state only on a fixed cadence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{Category, StatusReport};

/// Minimum gap before an identical category is re-delivered.
pub const REPEAT_SUPPRESSION_MS: i64 = 5 * 60 * 1000;

/// Transient notification payload built from one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCandidate {
    pub category: Category,
    pub title: Option<String>,
    pub body: String,
}

impl NotificationCandidate {
    pub fn from_report(report: &StatusReport) -> Self {
        let (title, body) = match &report.tooltip {
            Some(tooltip) => (tooltip.title.clone(), tooltip.body.clone()),
            None => (None, String::new()),
        };
        Self {
            category: report.category,
            title,
            body,
        }
    }
}

/// Tracks the last delivered notification. One instance per process; resets
/// implicitly on restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationGate {
    last: Option<(Category, DateTime<Utc>)>,
}

impl NotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a candidate should actually be delivered.
    ///
    /// A candidate passes when its category differs from the last delivered
    /// one, or when more than the repeat-suppression window has elapsed
    /// since the last delivery. Suppression leaves the recorded delivery
    /// untouched, so a sustained state re-alerts on a fixed cadence counted
    /// from the last actual delivery.
    pub fn consider(&mut self, category: Category, now: DateTime<Utc>) -> bool {
        if category == Category::None {
            return false;
        }

        let due = match self.last {
            None => true,
            Some((last_category, delivered_at)) => {
                last_category != category
                    || (now - delivered_at).num_milliseconds() > REPEAT_SUPPRESSION_MS
            }
        };

        if due {
            self.last = Some((category, now));
        } else {
            tracing::debug!(?category, "notification suppressed inside repeat window");
        }
        due
    }

    /// Last delivered category and timestamp, if any.
    pub fn last_delivery(&self) -> Option<(Category, DateTime<Utc>)> {
        self.last
    }
}

/// Delivery target for accepted notifications. Fire-and-forget.
pub trait NotificationSink {
    fn deliver(&mut self, title: Option<&str>, body: &str, category: Category);
}
