mod config;

pub use config::{Config, NotificationToggles, Thresholds};

use std::path::PathBuf;

/// Returns `~/.config/battray[-dev]/` based on BATTRAY_ENV.
///
/// Set BATTRAY_ENV=dev to use a separate development config directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BATTRAY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("battray-dev")
    } else {
        base_dir.join("battray")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
