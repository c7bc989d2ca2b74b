//! Display theme preference.
//!
//! Persisted in `<data_dir>/preferences.json`; a missing or unreadable
//! file means the default (light) theme.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::SessionError;

/// Preferences file name.
const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Display theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (the default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Theme,
}

fn preferences_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PREFERENCES_FILE_NAME)
}

/// Load the saved theme, defaulting to [`Theme::Light`].
#[must_use]
pub fn load_theme(data_dir: &Path) -> Theme {
    let path = preferences_path(data_dir);
    match std::fs::read_to_string(&path) {
        Ok(data) => serde_json::from_str::<Preferences>(&data)
            .map(|p| p.theme)
            .unwrap_or_else(|e| {
                tracing::warn!("failed to parse preferences file: {e}");
                Theme::default()
            }),
        Err(_) => Theme::default(),
    }
}

/// Persist the theme.
pub fn save_theme(data_dir: &Path, theme: Theme) -> Result<(), SessionError> {
    std::fs::create_dir_all(data_dir)?;
    let json = serde_json::to_string_pretty(&Preferences { theme })?;
    std::fs::write(preferences_path(data_dir), json)?;
    Ok(())
}

/// Flip the persisted theme and return the new value.
pub fn toggle_theme(data_dir: &Path) -> Result<Theme, SessionError> {
    let next = load_theme(data_dir).toggled();
    save_theme(data_dir, next)?;
    Ok(next)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_defaults_to_light() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_theme(dir.path()), Theme::Light);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        save_theme(dir.path(), Theme::Dark).unwrap();
        assert_eq!(load_theme(dir.path()), Theme::Dark);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let dir = TempDir::new().unwrap();
        assert_eq!(toggle_theme(dir.path()).unwrap(), Theme::Dark);
        assert_eq!(toggle_theme(dir.path()).unwrap(), Theme::Light);
        assert_eq!(load_theme(dir.path()), Theme::Light);
    }

    #[test]
    fn corrupt_file_defaults_to_light() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PREFERENCES_FILE_NAME), "][").unwrap();
        assert_eq!(load_theme(dir.path()), Theme::Light);
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Theme::Dark).unwrap(),
            r#""dark""#
        );
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
