//! Linux sysfs power-supply reader.
//!
//! Best-effort by design: every missing or unreadable attribute degrades the
//! sample instead of failing, bottoming out at an Unknown-state sample when
//! the power-supply class cannot be read at all.

use std::fs;
use std::path::{Path, PathBuf};

use battray_core::{percent_from_ratio, ChargeState, PowerSample, PowerSource};

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

pub struct SysfsPowerSource {
    root: PathBuf,
}

impl SysfsPowerSource {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(POWER_SUPPLY_ROOT),
        }
    }

    #[cfg(test)]
    fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn battery_dir(&self) -> Option<PathBuf> {
        for entry in fs::read_dir(&self.root).ok()?.flatten() {
            let path = entry.path();
            if read_trimmed(&path.join("type")).as_deref() == Some("Battery") {
                return Some(path);
            }
        }
        None
    }

    fn on_line_power(&self) -> bool {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return false;
        };
        entries.flatten().any(|entry| {
            let path = entry.path();
            read_trimmed(&path.join("type")).as_deref() == Some("Mains")
                && read_u64(&path.join("online")) == Some(1)
        })
    }
}

impl PowerSource for SysfsPowerSource {
    fn current_sample(&self) -> PowerSample {
        if fs::read_dir(&self.root).is_err() {
            return PowerSample::unknown();
        }
        let Some(dir) = self.battery_dir() else {
            let mut sample = PowerSample::unknown();
            sample.charge_state = ChargeState::NoBattery;
            return sample;
        };

        let energy_now = read_u64(&dir.join("energy_now"));
        let energy_full = read_u64(&dir.join("energy_full"));

        let percent = read_u64(&dir.join("capacity"))
            .map(|c| c.min(100) as u8)
            .or_else(|| match (energy_now, energy_full) {
                (Some(now), Some(full)) if full > 0 => {
                    Some(percent_from_ratio(now as f64 / full as f64))
                }
                _ => None,
            })
            .unwrap_or(0);

        // The kernel reports "Unknown" as a real status value.
        let charging = match read_trimmed(&dir.join("status")).as_deref() {
            Some("Charging") => true,
            Some("Unknown") | None => {
                return PowerSample::unknown();
            }
            Some(_) => false,
        };

        // power_now / energy_* are microwatt figures; the sample carries milli.
        let power_now = read_u64(&dir.join("power_now")).filter(|p| *p > 0);

        let seconds_remaining = if charging {
            None
        } else {
            read_u64(&dir.join("time_to_empty_now"))
                .or_else(|| {
                    let energy = energy_now?;
                    let power = power_now?;
                    Some(energy * 3600 / power)
                })
                .and_then(|secs| PowerSample::normalized_seconds(secs as i64))
        };

        PowerSample {
            percent,
            charge_state: if charging {
                ChargeState::Charging
            } else {
                ChargeState::Discharging
            },
            on_line_power: self.on_line_power(),
            seconds_remaining,
            charge_rate_mw: if charging {
                power_now.map(|p| (p / 1000) as u32)
            } else {
                None
            },
            full_capacity_mwh: energy_full.map(|e| (e / 1000) as u32),
            remaining_capacity_mwh: energy_now.map(|e| (e / 1000) as u32),
        }
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn read_u64(path: &Path) -> Option<u64> {
    read_trimmed(path)?.parse().ok()
}
