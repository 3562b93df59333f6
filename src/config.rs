use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::slots::SlotPolicy;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the JSON collections
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Localized message table; built-in defaults when absent
    #[serde(default)]
    pub messages_file: Option<PathBuf>,

    /// Booking slot policy
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
    #[serde(default = "default_lunch_hour")]
    pub lunch_hour: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
            lunch_hour: default_lunch_hour(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_window_days() -> i64 {
    14
}

fn default_open_hour() -> u32 {
    9
}

fn default_close_hour() -> u32 {
    16
}

fn default_lunch_hour() -> u32 {
    13
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(data_dir = %config.data_dir.display(), "configuration loaded");
        Ok(config)
    }

    /// Create default configuration rooted at a data directory
    pub fn default_for_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            messages_file: None,
            booking: BookingConfig::default(),
        }
    }

    /// Slot policy derived from the booking section
    pub fn slot_policy(&self) -> SlotPolicy {
        SlotPolicy {
            window_days: self.booking.window_days,
            open_hour: self.booking.open_hour,
            close_hour: self.booking.close_hour,
            lunch_hour: self.booking.lunch_hour,
        }
    }
}
