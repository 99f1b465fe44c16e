//! Configuration handling for Planogram CLI
//!
//! The only setting is the projects root: the directory under which
//! every project directory lives. Resolution order is the `--root` flag
//! (or `PLANOGRAM_ROOT`), then `projects_root` in the global
//! `config.toml`, then the platform data directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Global user configuration (`config.toml` in the user config directory)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Projects root directory
    pub projects_root: Option<PathBuf>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory under which every project directory lives
    pub projects_root: PathBuf,
}

impl Config {
    /// Resolves the projects root, with an optional explicit override
    pub fn resolve(root_override: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = root_override {
            return Ok(Self {
                projects_root: root,
            });
        }

        let global = Self::load_global()?;
        if let Some(root) = global.projects_root {
            return Ok(Self {
                projects_root: root,
            });
        }

        let dirs =
            Self::project_dirs().context("Could not determine a data directory for projects")?;
        Ok(Self {
            projects_root: dirs.data_dir().join("projects"),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "planogram", "planogram-cli")
    }

    /// Loads the global configuration, defaulting when absent
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config: {}", config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_global_config() {
        let toml = r#"projects_root = "/srv/planograms""#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.projects_root, Some(PathBuf::from("/srv/planograms")));
    }

    #[test]
    fn empty_global_config_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert!(config.projects_root.is_none());
    }

    #[test]
    fn explicit_root_wins() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/override"))).unwrap();
        assert_eq!(config.projects_root, PathBuf::from("/tmp/override"));
    }
}
