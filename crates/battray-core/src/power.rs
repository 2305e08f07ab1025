//! Normalized power-status snapshots.
//!
//! A [`PowerSample`] is recreated on every evaluation from whatever raw data
//! the platform reports. Missing figures are `None`, never errors: the
//! classifier treats an absent field as a branch and drops the corresponding
//! tooltip detail.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeState {
    /// No battery is present in the system.
    NoBattery,
    /// The battery state cannot be determined.
    Unknown,
    Charging,
    Discharging,
}

/// A snapshot of the host's power status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSample {
    /// 0-100, already rounded from the raw life ratio.
    pub percent: u8,
    pub charge_state: ChargeState,
    pub on_line_power: bool,
    /// Estimated seconds of battery life left; `None` when the platform
    /// reports an unknown or non-positive figure.
    pub seconds_remaining: Option<u64>,
    /// Charge rate in milliwatts. Present only while charging and the rate
    /// is measurable.
    pub charge_rate_mw: Option<u32>,
    /// Full-charge capacity in milliwatt-hours, used only for the
    /// time-to-full estimate.
    pub full_capacity_mwh: Option<u32>,
    pub remaining_capacity_mwh: Option<u32>,
}

impl PowerSample {
    /// A sample conveying nothing beyond "state unknown".
    pub fn unknown() -> Self {
        Self {
            percent: 0,
            charge_state: ChargeState::Unknown,
            on_line_power: false,
            seconds_remaining: None,
            charge_rate_mw: None,
            full_capacity_mwh: None,
            remaining_capacity_mwh: None,
        }
    }

    /// Normalize a raw seconds-remaining figure: non-positive means unknown.
    pub fn normalized_seconds(raw: i64) -> Option<u64> {
        if raw > 0 {
            Some(raw as u64)
        } else {
            None
        }
    }
}

/// Convert a 0.0-1.0 life ratio into a rounded whole percentage.
pub fn percent_from_ratio(ratio: f64) -> u8 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Source of power-status snapshots.
///
/// Implementations may return stale data but must not block indefinitely.
pub trait PowerSource {
    fn current_sample(&self) -> PowerSample;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_rounds_to_nearest_percent() {
        assert_eq!(percent_from_ratio(0.0), 0);
        assert_eq!(percent_from_ratio(0.154), 15);
        assert_eq!(percent_from_ratio(0.155), 16);
        assert_eq!(percent_from_ratio(0.995), 100);
        assert_eq!(percent_from_ratio(1.0), 100);
    }

    #[test]
    fn ratio_is_clamped_to_valid_range() {
        assert_eq!(percent_from_ratio(-0.5), 0);
        assert_eq!(percent_from_ratio(1.7), 100);
    }

    #[test]
    fn non_positive_seconds_are_unknown() {
        assert_eq!(PowerSample::normalized_seconds(-1), None);
        assert_eq!(PowerSample::normalized_seconds(0), None);
        assert_eq!(PowerSample::normalized_seconds(3600), Some(3600));
    }
}
