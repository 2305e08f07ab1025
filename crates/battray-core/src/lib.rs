//! # Battray Core Library
//!
//! This library provides the decision logic for the Battray battery
//! indicator. The CLI binary (and any tray shell) is a thin presentation
//! layer over this crate: it supplies a power source and display/notification
//! sinks, and the core decides what to show and when to alert.
//!
//! ## Key Components
//!
//! - [`classify`]: pure classification of a power sample into icon text,
//!   color role, tooltip and notification category
//! - [`NotificationGate`]: repeat suppression so a battery hovering at a
//!   threshold does not re-alert on every refresh tick
//! - [`UpdateDebouncer`]: coalesces bursts of update triggers into single
//!   evaluations on one task
//! - [`StatusMonitor`]: one evaluation cycle wiring the pieces together
//! - [`Config`]: TOML-based configuration with self-repairing thresholds

pub mod debounce;
pub mod error;
pub mod events;
pub mod monitor;
pub mod notify;
pub mod power;
pub mod retry;
pub mod status;
pub mod storage;

pub use debounce::{UpdateDebouncer, DEBOUNCE_WINDOW};
pub use error::{ConfigError, RenderError};
pub use events::Event;
pub use monitor::{DisplaySink, StatusMonitor, MAX_ICON_ATTEMPTS};
pub use notify::{NotificationCandidate, NotificationGate, NotificationSink};
pub use power::{percent_from_ratio, ChargeState, PowerSample, PowerSource};
pub use status::{
    classify, readable_duration, Category, ColorRole, StatusReport, Tooltip,
};
pub use storage::{Config, NotificationToggles, Thresholds};
