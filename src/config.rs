//! Application configuration read from `autocrm.toml`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::entities::session::DemoAccount;

pub const CONFIG_FILE: &str = "autocrm.toml";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "autocrm", "autocrm").ok_or_else(|| anyhow!("unable to resolve data directory"))
}

/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub database_file: String,
    /// Seed empty collections with example records at startup.
    pub seed_on_start: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub demo_account: DemoAccount,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: "autocrm.sqlite".to_string(),
            seed_on_start: true,
            log_filter: "info".to_string(),
            demo_account: DemoAccount::default(),
        }
    }
}

impl AppConfig {
    /// Reads `autocrm.toml` from the platform config directory, or defaults
    /// when there is none.
    pub fn load() -> Result<Self> {
        let path = project_dirs()?.config_dir().join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_local_dir().to_path_buf()),
        }
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.database_file))
    }

    /// Creates and returns the webview profile directory.
    pub fn webview_data_dir(&self) -> Result<PathBuf> {
        let dir = self.data_dir()?.join("webview");
        std::fs::create_dir_all(&dir).with_context(|| format!("failed to create webview dir: {}", dir.display()))?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml_str("").expect("parses");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.demo_account.username, "admin");
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = AppConfig::from_toml_str(
            r#"
data_dir = "/tmp/autocrm-test"
seed_on_start = false

[demo_account]
password = "letmein"
"#,
        )
        .expect("parses");

        assert!(!config.seed_on_start);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.demo_account.username, "admin");
        assert_eq!(config.demo_account.password, "letmein");
        assert_eq!(
            config.db_path().expect("resolves"),
            PathBuf::from("/tmp/autocrm-test").join("autocrm.sqlite")
        );
    }

    #[test]
    fn webview_dir_is_created_under_data_dir() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config = AppConfig {
            data_dir: Some(temp.path().to_path_buf()),
            ..AppConfig::default()
        };
        let dir = config.webview_data_dir().expect("creates");
        assert_eq!(dir, temp.path().join("webview"));
        assert!(dir.is_dir());
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(AppConfig::from_toml_str("seed_on_start = \"yes\"").is_err());
    }
}
