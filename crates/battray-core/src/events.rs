use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::power::ChargeState;
use crate::status::{Category, ColorRole};

/// Every evaluation cycle produces events. The shell logs or renders them;
/// tests assert on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StatusEvaluated {
        percent: u8,
        charge_state: ChargeState,
        color: ColorRole,
        category: Category,
        at: DateTime<Utc>,
    },
    NotificationDelivered {
        category: Category,
        at: DateTime<Utc>,
    },
    /// Candidate declined inside the repeat-suppression window.
    /// Expected control flow, distinct from a delivery failure.
    NotificationSuppressed {
        category: Category,
        at: DateTime<Utc>,
    },
    /// The icon render kept failing after the bounded retries.
    IconRenderFailed {
        attempts: u32,
        at: DateTime<Utc>,
    },
}
