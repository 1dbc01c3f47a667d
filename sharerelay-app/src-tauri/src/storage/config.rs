use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_sharerelay::DeliveryPolicy;

use crate::error::{Result, ShareRelayAppError};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Treat `--share-text` on the command line as a share intent.
    pub accept_command_line_shares: bool,
    /// Overrides the plugin's `consumeOnPush` when set.
    pub consume_on_push: Option<bool>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            accept_command_line_shares: true,
            consume_on_push: None,
        }
    }
}

impl AppSettings {
    pub fn delivery_override(&self) -> Option<DeliveryPolicy> {
        self.consume_on_push.map(|consume| {
            if consume {
                DeliveryPolicy::ConsumeOnPush
            } else {
                DeliveryPolicy::QueryOnly
            }
        })
    }
}

/// `settings.json` inside the app data directory, which is created if needed.
pub fn settings_path<R: Runtime>(app: &AppHandle<R>) -> Result<PathBuf> {
    let data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| ShareRelayAppError::Storage(format!("No app data directory: {}", e)))?;
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join(SETTINGS_FILE))
}

/// Load settings from `path`, writing the defaults there on first run.
pub fn get_or_create_settings(path: &Path) -> Result<AppSettings> {
    if !path.exists() {
        let settings = AppSettings::default();
        save_settings_to(path, &settings)?;
        return Ok(settings);
    }

    load_settings_from(path)
}

fn load_settings_from(path: &Path) -> Result<AppSettings> {
    let content = std::fs::read_to_string(path)?;
    let settings: AppSettings = serde_json::from_str(&content)?;
    Ok(settings)
}

fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            accept_command_line_shares: false,
            consume_on_push: Some(true),
        };

        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        assert_eq!(get_or_create_settings(&path).unwrap(), AppSettings::default());
        assert!(path.exists());

        std::fs::write(&path, r#"{ "consume_on_push": true }"#).unwrap();
        let edited = get_or_create_settings(&path).unwrap();
        assert_eq!(edited.consume_on_push, Some(true));
        assert!(edited.accept_command_line_shares);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(load_settings_from(&path).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_settings_from(&path).is_err());
    }

    #[test]
    fn test_delivery_override() {
        let mut settings = AppSettings::default();
        assert_eq!(settings.delivery_override(), None);

        settings.consume_on_push = Some(true);
        assert_eq!(
            settings.delivery_override(),
            Some(DeliveryPolicy::ConsumeOnPush)
        );

        settings.consume_on_push = Some(false);
        assert_eq!(settings.delivery_override(), Some(DeliveryPolicy::QueryOnly));
    }
}
