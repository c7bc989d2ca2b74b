//! # pulse-settings
//!
//! Configuration with layered sources for the InventoryPulse client.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`ClientSettings::default()`]
//! 2. **User file** — `~/.inventorypulse/settings.json` (deep-merged over
//!    defaults)
//! 3. **Environment variables** — `PULSE_*` overrides (highest priority)

#![deny(unsafe_code)]

mod errors;
mod loader;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default event stream URL.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws";

/// Client settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Event stream URL.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Directory for session, preferences, and settings files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl ClientSettings {
    /// The data directory as a path.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ws_url: default_ws_url(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_ws_url() -> String {
    DEFAULT_WS_URL.to_string()
}

fn default_data_dir() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.inventorypulse")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
