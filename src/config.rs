use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name used in the dashboard greeting
    pub user_name: String,
    /// Directory exports are written to; the working directory when unset
    pub export_dir: Option<String>,
    /// Keep the status column from being hidden
    pub protect_status_column: bool,
    /// Apply column changes only when the customize dialog is confirmed
    pub stage_column_changes: bool,
    /// Event poll timeout in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: "John".to_string(),
            export_dir: None,
            protect_status_column: true,
            stage_column_changes: true,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".contract-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Default log file inside the config directory
    pub fn default_log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("contract-tui.log"))
    }

    /// Whether a config file is present, readable or not
    pub fn file_exists() -> bool {
        Self::config_path().is_some_and(|path| path.exists())
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        Self::from_json(&contents)
    }

    /// Parse a config file; missing keys take their defaults
    pub fn from_json(contents: &str) -> Option<Config> {
        serde_json::from_str(contents).ok()
    }

    /// Resolve the export directory, preferring an explicit override
    pub fn export_dir(&self, cli_override: Option<&PathBuf>) -> PathBuf {
        match (cli_override, &self.export_dir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => PathBuf::from("."),
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.user_name, "John");
        assert!(config.protect_status_column);
        assert!(config.stage_column_changes);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config = Config::from_json(r#"{ "user_name": "Priya", "tick_rate_ms": 250 }"#).unwrap();
        assert_eq!(config.user_name, "Priya");
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.protect_status_column);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_unreadable_file_is_none() {
        assert!(Config::from_json("not json").is_none());
    }

    #[test]
    fn test_export_dir_resolution() {
        let mut config = Config::default();
        assert_eq!(config.export_dir(None), PathBuf::from("."));

        config.export_dir = Some("/tmp/exports".to_string());
        assert_eq!(config.export_dir(None), PathBuf::from("/tmp/exports"));

        let cli = PathBuf::from("/srv/out");
        assert_eq!(config.export_dir(Some(&cli)), cli);
    }
}
