//! Template locations and the built-in templates
//!
//! A template root holds two directories, `make_library` and `make_operation`,
//! each with an initializer file containing a marker.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, ScaffoldError};

pub const LIBRARY_TEMPLATE: &str = "make_library";
pub const OPERATION_TEMPLATE: &str = "make_operation";

/// Marker replaced with the lowercased library name
pub const LIBRARY_MARKER: &str = "LIBRARYNAME";
/// Marker replaced with the CamelCase operation name
pub const OPERATION_MARKER: &str = "NEWOPERATION";

pub const DEFAULT_INITIALIZER: &str = "__init__.py";

const BUILTIN_LIBRARY_INIT: &str = include_str!("../templates/make_library/__init__.py");
const BUILTIN_OPERATION_INIT: &str = include_str!("../templates/make_operation/__init__.py");

/// Resolved template directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub library_dir: PathBuf,
    pub operation_dir: PathBuf,
    /// File inside each template that receives substitution
    pub initializer: String,
}

impl TemplateSet {
    /// Standard layout under `root`
    pub fn from_root(root: &Path) -> Self {
        Self {
            library_dir: root.join(LIBRARY_TEMPLATE),
            operation_dir: root.join(OPERATION_TEMPLATE),
            initializer: DEFAULT_INITIALIZER.to_string(),
        }
    }

    pub fn with_initializer(mut self, initializer: &str) -> Self {
        self.initializer = initializer.to_string();
        self
    }

    /// Check that both templates and their initializer files exist
    pub fn validate(&self) -> Result<()> {
        for dir in [&self.library_dir, &self.operation_dir] {
            if !dir.is_dir() {
                return Err(ScaffoldError::NotFound(dir.clone()));
            }
            let init = dir.join(&self.initializer);
            if !init.is_file() {
                return Err(ScaffoldError::NotFound(init));
            }
        }
        Ok(())
    }

    /// Write the built-in templates into this set's directories.
    ///
    /// Existing template directories are left alone unless `force` is set, in
    /// which case only the initializer files are rewritten.
    pub fn write_builtin(&self, force: bool) -> Result<()> {
        if !force {
            if let Some(existing) = [&self.library_dir, &self.operation_dir]
                .into_iter()
                .find(|dir| dir.exists())
            {
                return Err(ScaffoldError::AlreadyExists(existing.clone()));
            }
        }

        for (dir, content) in [
            (&self.library_dir, BUILTIN_LIBRARY_INIT),
            (&self.operation_dir, BUILTIN_OPERATION_INIT),
        ] {
            fs::create_dir_all(dir)?;
            fs::write(dir.join(&self.initializer), content)?;
        }

        info!(
            library = %self.library_dir.display(),
            operation = %self.operation_dir.display(),
            "templates initialized"
        );
        Ok(())
    }
}

/// Write the built-in templates under `root` with the default initializer
pub fn init_templates(root: &Path, force: bool) -> Result<TemplateSet> {
    let set = TemplateSet::from_root(root);
    set.write_builtin(force)?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_templates_carry_markers() {
        assert!(BUILTIN_LIBRARY_INIT.contains(LIBRARY_MARKER));
        assert!(BUILTIN_OPERATION_INIT.contains(OPERATION_MARKER));
    }

    #[test]
    fn test_init_then_validate() -> Result<()> {
        let tmp = tempdir()?;
        let set = init_templates(tmp.path(), false)?;

        set.validate()?;
        assert_eq!(set, TemplateSet::from_root(tmp.path()));
        Ok(())
    }

    #[test]
    fn test_init_refuses_overwrite() -> Result<()> {
        let tmp = tempdir()?;
        init_templates(tmp.path(), false)?;

        let err = init_templates(tmp.path(), false).unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists(_)));
        Ok(())
    }

    #[test]
    fn test_init_force_restores_initializer() -> Result<()> {
        let tmp = tempdir()?;
        let set = init_templates(tmp.path(), false)?;
        let init = set.library_dir.join(DEFAULT_INITIALIZER);
        fs::write(&init, "edited")?;

        init_templates(tmp.path(), true)?;
        assert_eq!(fs::read_to_string(&init)?, BUILTIN_LIBRARY_INIT);
        Ok(())
    }

    #[test]
    fn test_validate_reports_missing_initializer() -> Result<()> {
        let tmp = tempdir()?;
        let set = init_templates(tmp.path(), false)?;
        fs::remove_file(set.operation_dir.join(DEFAULT_INITIALIZER))?;

        match set.validate() {
            Err(ScaffoldError::NotFound(path)) => {
                assert!(path.ends_with("make_operation/__init__.py"))
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_write_builtin_custom_initializer() -> Result<()> {
        let tmp = tempdir()?;
        let set = TemplateSet::from_root(tmp.path()).with_initializer("mod.py");
        set.write_builtin(false)?;

        set.validate()?;
        assert!(!set.library_dir.join(DEFAULT_INITIALIZER).exists());
        Ok(())
    }

    #[test]
    fn test_validate_empty_root() -> Result<()> {
        let tmp = tempdir()?;
        let err = TemplateSet::from_root(tmp.path()).validate().unwrap_err();
        assert!(matches!(err, ScaffoldError::NotFound(_)));
        Ok(())
    }
}
