//! Application settings persisted as JSON
//!
//! The on-disk format is a flat `settings.json` with PascalCase keys, kept
//! compatible with earlier releases: files written before project mode
//! existed load cleanly with the project fields defaulted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Ensure the application base directory exists and return it
///
/// XDG Base Directory Specification: $XDG_DATA_HOME/wslclip, defaulting to
/// ~/.local/share/wslclip. Holds settings.json, the default image directory
/// and log files.
pub fn ensure_base_dir() -> Result<PathBuf> {
    let base_dir = if let Ok(xdg_data) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("wslclip")
    } else {
        let home = env::var("HOME").context("HOME environment variable not set")?;
        PathBuf::from(home).join(".local/share/wslclip")
    };

    fs::create_dir_all(&base_dir)
        .with_context(|| format!("Failed to create base directory {:?}", base_dir))?;

    log::debug!("Base directory: {:?}", base_dir);
    Ok(base_dir)
}

/// Settings file name inside the base directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Default subdirectory for saved images when project mode is inactive
pub const DEFAULT_IMAGE_DIR: &str = "ClipboardImages";

/// In-memory settings record
///
/// Owned by the process; every committed change goes back through
/// [`SettingsStore::save`] so the file and the record never diverge for more
/// than one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Directory images are saved to when project mode is inactive
    pub save_path: String,
    /// Enable the debug log file
    pub enable_logging: bool,
    /// Enable project mode (only takes effect with a non-empty root path)
    pub project_mode_enabled: bool,
    /// Project root directory used by project mode
    pub project_root_path: String,
    /// Subdirectory under the project root where screenshots land
    pub project_screenshots_dir: String,
}

impl Settings {
    /// Default settings anchored at `base_dir`
    pub fn defaults(base_dir: &Path) -> Self {
        Settings {
            save_path: base_dir
                .join(DEFAULT_IMAGE_DIR)
                .to_string_lossy()
                .into_owned(),
            enable_logging: false,
            project_mode_enabled: false,
            project_root_path: String::new(),
            project_screenshots_dir: "screenshots".to_string(),
        }
    }
}

/// Raw settings file shape for deserialization
///
/// Every field is optional so that older files and hand-edited files merge
/// instead of failing. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    save_path: Option<String>,
    enable_logging: Option<bool>,
    project_mode_enabled: Option<bool>,
    project_root_path: Option<String>,
    project_screenshots_dir: Option<String>,
}

/// Loads and saves the settings file for a base directory
pub struct SettingsStore {
    base_dir: PathBuf,
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let path = base_dir.join(SETTINGS_FILE);
        SettingsStore { base_dir, path }
    }

    /// Default settings for this store's base directory
    pub fn defaults(&self) -> Settings {
        Settings::defaults(&self.base_dir)
    }

    /// Get the settings file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load settings, falling back to defaults
    ///
    /// A missing file is not an error. A file that fails to parse leaves
    /// every field at its default so a corrupt file can never half-apply.
    /// String keys only override when present and non-empty; boolean keys
    /// override whenever present (an explicit `false` is distinct from
    /// absent).
    pub fn load(&self) -> Settings {
        let mut settings = self.defaults();

        if !self.path.exists() {
            log::debug!("Settings file not found at {:?}, using defaults", self.path);
            return settings;
        }

        let file: SettingsFile = match fs::read_to_string(&self.path)
            .context("read")
            .and_then(|s| serde_json::from_str(&s).context("parse"))
        {
            Ok(file) => file,
            Err(e) => {
                log::warn!(
                    "Ignoring invalid settings file {:?}, using defaults: {:#}",
                    self.path,
                    e
                );
                return settings;
            }
        };

        if let Some(save_path) = file.save_path.filter(|s| !s.is_empty()) {
            settings.save_path = save_path;
        }
        if let Some(enable_logging) = file.enable_logging {
            settings.enable_logging = enable_logging;
        }
        if let Some(project_mode_enabled) = file.project_mode_enabled {
            settings.project_mode_enabled = project_mode_enabled;
        }
        if let Some(root) = file.project_root_path.filter(|s| !s.is_empty()) {
            settings.project_root_path = root;
        }
        if let Some(dir) = file.project_screenshots_dir.filter(|s| !s.is_empty()) {
            settings.project_screenshots_dir = dir;
        }

        log::info!("Loaded settings from {:?}", self.path);
        settings
    }

    /// Save settings to disk, best effort
    ///
    /// A write failure is logged and otherwise ignored; the in-memory record
    /// stays authoritative for the running process.
    pub fn save(&self, settings: &Settings) {
        if let Err(e) = self.try_save(settings) {
            log::warn!("Failed to save settings to {:?}: {:#}", self.path, e);
        }
    }

    fn try_save(&self, settings: &Settings) -> Result<()> {
        let json =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        log::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsStore::new(dir.path()).defaults();

        assert_eq!(
            settings.save_path,
            dir.path().join("ClipboardImages").to_string_lossy()
        );
        assert!(!settings.enable_logging);
        assert!(!settings.project_mode_enabled);
        assert_eq!(settings.project_root_path, "");
        assert_eq!(settings.project_screenshots_dir, "screenshots");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        assert_eq!(store.load(), store.defaults());
    }

    #[test]
    fn test_load_malformed_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(store.path(), "{not json at all").unwrap();
        assert_eq!(store.load(), store.defaults());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());

        let mut settings = store.defaults();
        settings.save_path = "/tmp/shots".to_string();
        settings.enable_logging = true;
        settings.project_mode_enabled = true;
        settings.project_root_path = r"C:\Proj".to_string();
        settings.project_screenshots_dir = "assets/img".to_string();
        store.save(&settings);

        let loaded = SettingsStore::new(dir.path()).load();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_legacy_file_without_project_keys() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{ "SavePath": "/old/save/dir", "EnableLogging": true }"#,
        )
        .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.save_path, "/old/save/dir");
        assert!(loaded.enable_logging);
        assert!(!loaded.project_mode_enabled);
        assert_eq!(loaded.project_root_path, "");
        assert_eq!(loaded.project_screenshots_dir, "screenshots");
    }

    #[test]
    fn test_empty_strings_keep_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{ "SavePath": "", "ProjectScreenshotsDir": "" }"#,
        )
        .unwrap();

        let loaded = store.load();
        assert_eq!(loaded, store.defaults());
    }

    #[test]
    fn test_explicit_false_overrides() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{ "EnableLogging": false, "ProjectModeEnabled": false }"#,
        )
        .unwrap();

        let loaded = store.load();
        assert!(!loaded.enable_logging);
        assert!(!loaded.project_mode_enabled);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{ "SavePath": "/keep/me", "FutureOption": 42 }"#,
        )
        .unwrap();

        assert_eq!(store.load().save_path, "/keep/me");
    }

    #[test]
    fn test_saved_file_uses_pascal_case_keys() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        store.save(&store.defaults());

        let json = fs::read_to_string(store.path()).unwrap();
        for key in [
            "SavePath",
            "EnableLogging",
            "ProjectModeEnabled",
            "ProjectRootPath",
            "ProjectScreenshotsDir",
        ] {
            assert!(json.contains(key), "missing key {} in {}", key, json);
        }
    }
}
