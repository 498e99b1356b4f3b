use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use super::mapper::apply_env_overrides;
use crate::models::settings::GridSettings;

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file in the per-user config directory
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "BookingGrid", "BookingGrid") {
            dirs.config_dir().join(SETTINGS_FILE)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(SETTINGS_FILE)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings file; a missing file yields defaults
    pub fn get(&self) -> Result<GridSettings> {
        if !self.path.exists() {
            return Ok(GridSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: GridSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    /// Validate and write the settings file
    pub fn update(&self, settings: &GridSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Startup path: file settings (or defaults on error) with environment overrides
    pub fn load_or_default(&self) -> GridSettings {
        let mut settings = match self.get() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                GridSettings::default()
            }
        };
        apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::settings::{ENV_API_URL, ENV_TOKEN};
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));
        assert_eq!(service.get().unwrap(), GridSettings::default());
    }

    #[test]
    fn test_update_then_get() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join("settings.toml"));
        let settings = GridSettings {
            window_days: Some(14),
            initial_month: Some("2024-06".to_string()),
            ..GridSettings::default()
        };

        service.update(&settings).unwrap();
        assert_eq!(service.get().unwrap(), settings);
    }

    #[test]
    fn test_update_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));
        let settings = GridSettings {
            column_width: -1.0,
            ..GridSettings::default()
        };
        assert!(service.update(&settings).is_err());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "row_height = \"tall\"").unwrap();
        assert!(SettingsService::new(path).get().is_err());
    }

    #[test]
    #[serial]
    fn test_load_or_default_falls_back_and_reads_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not toml at all [").unwrap();

        std::env::set_var(ENV_API_URL, "http://10.0.0.5:9000");
        std::env::remove_var(ENV_TOKEN);
        let settings = SettingsService::new(path).load_or_default();
        std::env::remove_var(ENV_API_URL);

        assert_eq!(settings.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(settings.row_height, GridSettings::default().row_height);
    }
}
