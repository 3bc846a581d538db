//! Settings file management
//!
//! Handles finding, loading, and validating settings files.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::Settings;

/// Settings file locations (in order of precedence)
const SETTINGS_LOCATIONS: &[&str] = &[
    "./netcheck.yaml",
    "./netcheck.yml",
    "./.netcheck.yaml",
    "~/.config/netcheck/config.yaml",
    "~/.netcheck.yaml",
];

impl Settings {
    /// Find a settings file in the standard locations
    pub fn find() -> Option<PathBuf> {
        for location in SETTINGS_LOCATIONS {
            let path = expand_path(location);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Load settings from the first discovered file, defaults when none exists
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML settings: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON settings: {}", path.display()))?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize settings")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Settings file content shipped by `config init`
    pub fn example() -> Self {
        Self::default()
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(true)
}

fn expand_path(location: &str) -> PathBuf {
    if let Some(rest) = location.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netcheck.yaml");

        let mut settings = Settings::default();
        settings.node.image = "calico/node:v3.26".to_string();
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.node.image, "calico/node:v3.26");
        assert_eq!(loaded.pod_wait.retries, settings.pod_wait.retries);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netcheck.json");

        Settings::default().save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.node.daemonset, "calico-node");
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netcheck.yaml");

        std::fs::write(&path, "pod_wait:\n  retries: 0\n  wait_secs: 3\n").unwrap();
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(Settings::load("/nonexistent/netcheck.yaml").is_err());
    }

    #[test]
    fn test_expand_path_keeps_plain_paths() {
        assert_eq!(expand_path("./netcheck.yaml"), PathBuf::from("./netcheck.yaml"));
    }

    #[test]
    fn test_is_yaml_file() {
        assert!(is_yaml_file(Path::new("a.yaml")));
        assert!(is_yaml_file(Path::new("a.yml")));
        assert!(!is_yaml_file(Path::new("a.json")));
    }
}
