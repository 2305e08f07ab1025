//! TOML-based application configuration.
//!
//! Stores the battery thresholds, per-category notification toggles and the
//! sampling cadence at `~/.config/battray/config.toml`. Threshold mutations
//! keep `critical <= low <= high` by pulling the other values along;
//! out-of-order input is silently normalized, never an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Battery percentage thresholds. Ordered `critical <= low <= high` at all
/// times; the setters repair the ordering instead of rejecting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_critical")]
    critical: u8,
    #[serde(default = "default_low")]
    low: u8,
    #[serde(default = "default_high")]
    high: u8,
}

impl Thresholds {
    /// Build an ordered triple from arbitrary values.
    pub fn new(critical: u8, low: u8, high: u8) -> Self {
        let mut thresholds = Self {
            critical: 0,
            low: 0,
            high: 0,
        };
        thresholds.set_high(high);
        thresholds.set_low(low);
        thresholds.set_critical(critical);
        thresholds
    }

    pub fn critical(&self) -> u8 {
        self.critical
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    /// Set the critical threshold, pulling `low` and `high` up if needed.
    pub fn set_critical(&mut self, value: u8) {
        self.critical = value.min(100);
        if self.low < self.critical {
            self.low = self.critical;
        }
        if self.high < self.critical {
            self.high = self.critical;
        }
    }

    /// Set the low threshold, pulling `critical` down and `high` up if needed.
    pub fn set_low(&mut self, value: u8) {
        self.low = value.min(100);
        if self.critical > self.low {
            self.critical = self.low;
        }
        if self.high < self.low {
            self.high = self.low;
        }
    }

    /// Set the high threshold, pulling `critical` and `low` down if needed.
    pub fn set_high(&mut self, value: u8) {
        self.high = value.min(100);
        if self.critical > self.high {
            self.critical = self.high;
        }
        if self.low > self.high {
            self.low = self.high;
        }
    }

    /// Repair an out-of-order triple read from disk by pulling upward.
    fn normalize(&mut self) {
        self.critical = self.critical.min(100);
        self.low = self.low.min(100).max(self.critical);
        self.high = self.high.min(100).max(self.low);
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            low: default_low(),
            high: default_high(),
        }
    }
}

/// Per-category notification toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationToggles {
    #[serde(default = "default_true")]
    pub full: bool,
    #[serde(default = "default_true")]
    pub high: bool,
    #[serde(default = "default_true")]
    pub low: bool,
    #[serde(default = "default_true")]
    pub critical: bool,
}

impl Default for NotificationToggles {
    fn default() -> Self {
        Self {
            full: true,
            high: true,
            low: true,
            critical: true,
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/battray/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub notifications: NotificationToggles,
    /// Sampling cadence for the refresh timer, in seconds. Always positive.
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u32,
}

// Default functions
fn default_critical() -> u8 {
    10
}
fn default_low() -> u8 {
    20
}
fn default_high() -> u8 {
    80
}
fn default_refresh_seconds() -> u32 {
    60
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            notifications: NotificationToggles::default(),
            refresh_seconds: default_refresh_seconds(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as bool"),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(ConfigError::NoConfigDir)?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing and returning the default when no file
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if the default config cannot be written to disk. Only a
    /// missing file falls back to defaults; a permission failure or other
    /// I/O error is reported instead of being papered over.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let mut cfg: Config = toml::from_str(&content)?;
                // A hand-edited file may be out of order or carry a zero cadence.
                cfg.thresholds.normalize();
                if cfg.refresh_seconds == 0 {
                    cfg.refresh_seconds = default_refresh_seconds();
                }
                Ok(cfg)
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(source) => Err(ConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// Threshold keys are routed through the repairing setters, so the saved
    /// file can never observe an out-of-order triple.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let mut updated: Config = serde_json::from_value(json)?;

        match key {
            "thresholds.critical" => {
                let v = updated.thresholds.critical;
                updated.thresholds.set_critical(v);
            }
            "thresholds.low" => {
                let v = updated.thresholds.low;
                updated.thresholds.set_low(v);
            }
            "thresholds.high" => {
                let v = updated.thresholds.high;
                updated.thresholds.set_high(v);
            }
            "refresh_seconds" if updated.refresh_seconds == 0 => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be positive".to_string(),
                });
            }
            _ => {}
        }

        *self = updated;
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.thresholds.critical(), 10);
        assert_eq!(parsed.thresholds.low(), 20);
        assert_eq!(parsed.thresholds.high(), 80);
        assert!(parsed.notifications.full);
        assert_eq!(parsed.refresh_seconds, 60);
    }

    #[test]
    fn raising_critical_pulls_low_and_high_up() {
        let mut t = Thresholds::new(10, 20, 80);
        t.set_critical(85);
        assert_eq!((t.critical(), t.low(), t.high()), (85, 85, 85));
    }

    #[test]
    fn raising_low_pulls_high_up_and_critical_stays() {
        let mut t = Thresholds::new(10, 20, 80);
        t.set_low(90);
        assert_eq!((t.critical(), t.low(), t.high()), (10, 90, 90));
    }

    #[test]
    fn lowering_low_pulls_critical_down() {
        let mut t = Thresholds::new(10, 20, 80);
        t.set_low(5);
        assert_eq!((t.critical(), t.low(), t.high()), (5, 5, 80));
    }

    #[test]
    fn lowering_high_pulls_both_down() {
        let mut t = Thresholds::new(10, 20, 80);
        t.set_high(8);
        assert_eq!((t.critical(), t.low(), t.high()), (8, 8, 8));
    }

    #[test]
    fn setters_clamp_to_one_hundred() {
        let mut t = Thresholds::new(10, 20, 80);
        t.set_high(250);
        assert_eq!(t.high(), 100);
        t.set_critical(120);
        assert_eq!((t.critical(), t.low(), t.high()), (100, 100, 100));
    }

    #[test]
    fn out_of_order_file_is_normalized_on_load() {
        let content = "[thresholds]\ncritical = 50\nlow = 30\nhigh = 20\n";
        let mut cfg: Config = toml::from_str(content).unwrap();
        cfg.thresholds.normalize();
        let t = cfg.thresholds;
        assert!(t.critical() <= t.low() && t.low() <= t.high());
        assert_eq!((t.critical(), t.low(), t.high()), (50, 50, 50));
    }

    #[test]
    fn missing_file_writes_and_returns_defaults() {
        let dir = std::env::temp_dir().join("battray-config-missing");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn unreadable_file_is_an_error_not_defaults() {
        // A directory at the config path makes the read fail with something
        // other than NotFound.
        let path = std::env::temp_dir().join("battray-config-unreadable");
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("thresholds.low").as_deref(), Some("20"));
        assert_eq!(cfg.get("notifications.full").as_deref(), Some("true"));
        assert_eq!(cfg.get("refresh_seconds").as_deref(), Some("60"));
        assert!(cfg.get("thresholds.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "thresholds.low", "35").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "thresholds.low").unwrap(),
            &serde_json::Value::Number(35.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "notifications.high", "false").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "notifications.high").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "thresholds.nonexistent", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "notifications.low", "not_a_bool");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    proptest! {
        #[test]
        fn ordering_invariant_holds_after_any_mutation(
            ops in proptest::collection::vec((0u8..3u8, 0u8..=120u8), 1..40)
        ) {
            let mut t = Thresholds::default();
            for (which, value) in ops {
                match which {
                    0 => t.set_critical(value),
                    1 => t.set_low(value),
                    _ => t.set_high(value),
                }
                prop_assert!(t.critical() <= t.low());
                prop_assert!(t.low() <= t.high());
                prop_assert!(t.high() <= 100);
            }
        }
    }
}
