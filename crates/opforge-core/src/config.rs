//! Configuration management for opforge

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::{Paths, TEMPLATE_DIR_ENV};

/// Global opforge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `make_library` and `make_operation`
    #[serde(default)]
    pub template_root: Option<PathBuf>,

    /// Initializer file expected in every library and operation
    #[serde(default = "default_initializer")]
    pub initializer: String,

    /// Operations directory used when the CLI is not given one
    #[serde(default = "default_operations_dir")]
    pub operations_dir: PathBuf,
}

fn default_initializer() -> String {
    "__init__.py".to_string()
}

fn default_operations_dir() -> PathBuf {
    PathBuf::from("operations")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_root: None,
            initializer: default_initializer(),
            operations_dir: default_operations_dir(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from the standard location
    pub fn load_default() -> Result<Self> {
        Self::load(&Paths::new().config_file())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the template root.
    ///
    /// Precedence: explicit override, `OPFORGE_TEMPLATE_DIR`, the config file,
    /// then the data directory.
    pub fn resolve_template_root(&self, explicit: Option<&Path>) -> PathBuf {
        self.resolve_template_root_with(explicit, std::env::var(TEMPLATE_DIR_ENV).ok())
    }

    /// [`resolve_template_root`](Self::resolve_template_root) with the
    /// environment value passed in. An empty value counts as unset.
    pub fn resolve_template_root_with(&self, explicit: Option<&Path>, env: Option<String>) -> PathBuf {
        if let Some(dir) = explicit {
            return dir.to_path_buf();
        }
        if let Some(dir) = env.filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        self.template_root
            .clone()
            .unwrap_or_else(|| Paths::new().templates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let tmp = tempdir()?;
        let config = Config::load(&tmp.path().join("nope.json"))?;
        assert_eq!(config, Config::default());
        assert_eq!(config.initializer, "__init__.py");
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"template_root": "/srv/templates"}"#)?;

        let config = Config::load(&path)?;
        assert_eq!(config.template_root, Some(PathBuf::from("/srv/templates")));
        assert_eq!(config.operations_dir, PathBuf::from("operations"));
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("nested/config.json");
        let config = Config {
            initializer: "mod.rs".to_string(),
            ..Default::default()
        };
        config.save(&path)?;

        assert_eq!(Config::load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_bad_json_is_an_error() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{not json")?;
        assert!(Config::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_explicit_root_wins() {
        let config = Config {
            template_root: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let root = config.resolve_template_root_with(
            Some(Path::new("/from/flag")),
            Some("/from/env".to_string()),
        );
        assert_eq!(root, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_env_beats_config() {
        let config = Config {
            template_root: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let root = config.resolve_template_root_with(None, Some("/from/env".to_string()));
        assert_eq!(root, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let config = Config {
            template_root: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let root = config.resolve_template_root_with(None, Some(String::new()));
        assert_eq!(root, PathBuf::from("/from/config"));
    }

    #[test]
    fn test_config_beats_data_dir() {
        let config = Config {
            template_root: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_template_root_with(None, None),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_falls_back_to_data_dir() {
        let root = Config::default().resolve_template_root_with(None, None);
        assert_eq!(root, Paths::new().templates());
    }
}
