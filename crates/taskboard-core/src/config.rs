use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{TaskboardError, TaskboardResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fall back to seeded in-memory data when no data file is configured.
    #[serde(default = "default_demo_mode")]
    pub demo_mode: bool,
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Persist the new order of a list after a within-list reorder.
    #[serde(default)]
    pub persist_reorder: bool,
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,
}

fn default_demo_mode() -> bool {
    true
}

fn default_per_page() -> usize {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo_mode: default_demo_mode(),
            data_file: None,
            persist_reorder: false,
            default_per_page: default_per_page(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring config at {}: {}",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> TaskboardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> TaskboardResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TaskboardError::Config(e.to_string()))?;
        if config.default_per_page == 0 {
            return Err(TaskboardError::Config(
                "default_per_page must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.data_file = path;
        }
        self
    }

    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.demo_mode);
        assert!(config.data_file.is_none());
        assert!(!config.persist_reorder);
        assert_eq!(config.default_per_page, 20);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml("persist_reorder = true").unwrap();
        assert!(config.persist_reorder);
        assert!(config.demo_mode);
        assert_eq!(config.default_per_page, 20);
    }

    #[test]
    fn test_zero_per_page_rejected() {
        let err = AppConfig::from_toml("default_per_page = 0").unwrap_err();
        assert!(matches!(err, TaskboardError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(AppConfig::from_toml("demo_mode = ").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "demo_mode = false\ndata_file = \"/tmp/board.json\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(!config.demo_mode);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/board.json")));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_demo_mode(false)
            .with_data_file(Some(PathBuf::from("a.json")));
        assert!(!config.demo_mode);
        assert_eq!(config.data_file, Some(PathBuf::from("a.json")));

        let config = config.with_data_file(None);
        assert_eq!(config.data_file, Some(PathBuf::from("a.json")));
    }
}
