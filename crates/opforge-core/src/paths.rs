//! Standard paths used by opforge

use std::path::PathBuf;

/// Environment variable that overrides the template root
pub const TEMPLATE_DIR_ENV: &str = "OPFORGE_TEMPLATE_DIR";

/// Standard opforge paths
pub struct Paths {
    /// Data directory (~/.local/share/opforge)
    pub data: PathBuf,
    /// Config directory (~/.config/opforge)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("opforge");

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("opforge");

        Self { data, config }
    }

    /// Config file path
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }

    /// Default template root when nothing else is configured
    pub fn templates(&self) -> PathBuf {
        self.data.join("templates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = Paths::new();
        assert!(paths.config_file().ends_with("opforge/config.json"));
        assert!(paths.templates().ends_with("opforge/templates"));
    }
}
