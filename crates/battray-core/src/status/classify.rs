//! Battery status classification.
//!
//! [`classify`] is a pure function from a power sample and the user
//! configuration to a display descriptor plus a notification category.
//! Guard clauses run top-down: missing battery, unknown state, fully
//! charged, then the percentage display with its charging and threshold
//! branches. No state survives between calls.

use serde::{Deserialize, Serialize};

use crate::power::{ChargeState, PowerSample};
use crate::storage::Config;

use super::format::readable_duration;

/// Tray icon text when no battery is detected.
pub const NO_BATTERY_GLYPH: &str = "\u{274c}";
/// Tray icon text when the battery state cannot be determined.
pub const UNKNOWN_GLYPH: &str = "\u{2753}";
/// "Battery full" glyph (Segoe Fluent Icons code point).
pub const FULL_GLYPH: &str = "\u{f5fc}";

/// Semantic color identifier. The display sink resolves it to an actual
/// color; the core never deals in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Normal,
    Charging,
    Low,
    Critical,
}

/// Notification severity bucket derived from battery state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    None,
    Full,
    High,
    Low,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    pub title: Option<String>,
    pub body: String,
}

impl Tooltip {
    fn titled(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
        }
    }

    fn body_only(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    /// Single string for the tray tooltip: title and body on separate lines.
    pub fn render(&self) -> String {
        match &self.title {
            Some(title) => format!("{title}\n{}", self.body),
            None => self.body.clone(),
        }
    }
}

/// Output of one classification: what to draw and whether to alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub icon_text: String,
    pub color: ColorRole,
    /// `None` keeps whatever tooltip is currently displayed.
    pub tooltip: Option<Tooltip>,
    pub category: Category,
}

/// Classify a power sample under the given configuration.
pub fn classify(sample: &PowerSample, config: &Config) -> StatusReport {
    match sample.charge_state {
        ChargeState::NoBattery => {
            return StatusReport {
                icon_text: NO_BATTERY_GLYPH.into(),
                color: ColorRole::Normal,
                tooltip: Some(Tooltip::body_only("No battery detected")),
                category: Category::None,
            }
        }
        ChargeState::Unknown => {
            return StatusReport {
                icon_text: UNKNOWN_GLYPH.into(),
                color: ColorRole::Normal,
                tooltip: None,
                category: Category::None,
            }
        }
        ChargeState::Charging | ChargeState::Discharging => {}
    }

    if sample.percent == 100 {
        return classify_full(sample.on_line_power, config);
    }

    if sample.charge_state == ChargeState::Charging {
        classify_charging(sample, config)
    } else {
        classify_on_battery(sample, config)
    }
}

fn classify_full(on_line_power: bool, config: &Config) -> StatusReport {
    let suffix = if on_line_power {
        ", and connected to power"
    } else {
        ""
    };
    let body = format!("fully charged{suffix}");

    if !config.notifications.full {
        // Nothing to announce; the glyph and tooltip body are all we need.
        return StatusReport {
            icon_text: FULL_GLYPH.into(),
            color: ColorRole::Normal,
            tooltip: Some(Tooltip::body_only(body)),
            category: Category::None,
        };
    }

    StatusReport {
        icon_text: FULL_GLYPH.into(),
        color: ColorRole::Normal,
        tooltip: Some(Tooltip::titled(format!("Fully charged{suffix}"), body)),
        category: Category::Full,
    }
}

fn classify_charging(sample: &PowerSample, config: &Config) -> StatusReport {
    let percent = sample.percent;
    let phrase = format!("{percent}% charging");

    let tooltip = match sample.charge_rate_mw {
        Some(rate) if rate > 0 => {
            let body = match (sample.full_capacity_mwh, sample.remaining_capacity_mwh) {
                (Some(full), Some(remaining)) => {
                    let hours = f64::from(full.saturating_sub(remaining)) / f64::from(rate);
                    let secs = (hours * 3600.0).round() as u64;
                    format!("{} until fully charged", readable_duration(secs))
                }
                // Capacity figures unavailable; no time-to-full estimate.
                _ => phrase.clone(),
            };
            Tooltip::titled(phrase.clone(), body)
        }
        _ => Tooltip::body_only(phrase.clone()),
    };

    StatusReport {
        icon_text: percent.to_string(),
        color: ColorRole::Charging,
        tooltip: Some(tooltip),
        category: high_or_full_category(percent, config),
    }
}

fn classify_on_battery(sample: &PowerSample, config: &Config) -> StatusReport {
    let percent = sample.percent;

    let (color, category) = if percent <= config.thresholds.critical() {
        let category = if config.notifications.critical {
            Category::Critical
        } else {
            Category::None
        };
        (ColorRole::Critical, category)
    } else if percent <= config.thresholds.low() {
        let category = if config.notifications.low {
            Category::Low
        } else {
            Category::None
        };
        (ColorRole::Low, category)
    } else {
        (ColorRole::Normal, high_or_full_category(percent, config))
    };

    let phrase = if sample.on_line_power {
        format!("{percent}% connected (not charging)")
    } else {
        format!("{percent}% on battery")
    };
    let tooltip = match sample.seconds_remaining {
        Some(secs) if secs > 0 => {
            Tooltip::titled(phrase, format!("{} remaining", readable_duration(secs)))
        }
        _ => Tooltip::body_only(phrase),
    };

    StatusReport {
        icon_text: percent.to_string(),
        color,
        tooltip: Some(tooltip),
        category,
    }
}

/// Shared sub-rule for the charging and normal branches.
///
/// The `percent == 100` arm is normally unreachable because a full battery
/// is handled before either branch runs; it is kept for the
/// charging-at-100 edge case.
pub fn high_or_full_category(percent: u8, config: &Config) -> Category {
    if percent == config.thresholds.high() && config.notifications.high {
        Category::High
    } else if percent == 100 && config.notifications.full {
        Category::Full
    } else {
        Category::None
    }
}
