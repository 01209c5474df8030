//! Library and operation scaffolding
//!
//! Libraries are directories directly under an operations directory.
//! Operations are directories inside a library. Both are created from a
//! template, with one marker substituted in the initializer file.

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

use crate::error::{Result, ScaffoldError};
use crate::placeholders::{replace_placeholders_in_file, to_camel_case, Placeholders};
use crate::staging::StagedTree;
use crate::templates::{TemplateSet, LIBRARY_MARKER, OPERATION_MARKER};

/// Creates and queries libraries and operations
#[derive(Debug, Clone)]
pub struct Scaffolder {
    templates: TemplateSet,
}

impl Scaffolder {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Check if a library exists in `operations_dir`
    pub fn library_exists(&self, name: &str, operations_dir: &Path) -> Result<bool> {
        require_dir(operations_dir)?;
        let dir_name = library_dir_name(name)?;
        Ok(operations_dir.join(dir_name).is_dir())
    }

    /// Check if an operation exists, meaning its initializer file is present
    pub fn operation_exists(
        &self,
        operations_dir: &Path,
        library_name: &str,
        operation_name: &str,
    ) -> Result<bool> {
        let library_path = self.existing_library(operations_dir, library_name)?;
        validate_name(operation_name)?;
        Ok(library_path
            .join(operation_name)
            .join(&self.templates.initializer)
            .is_file())
    }

    /// Create a new library and return its path
    pub fn library_create(&self, library_name: &str, out_dir: &Path) -> Result<PathBuf> {
        if self.library_exists(library_name, out_dir)? {
            return Err(ScaffoldError::LibraryAlreadyExists {
                name: library_name.to_string(),
                dir: out_dir.to_path_buf(),
            });
        }

        let dir_name = library_dir_name(library_name)?;
        let dest = out_dir.join(&dir_name);
        let placeholders = Placeholders::new().with(LIBRARY_MARKER, &dir_name);

        let path = self.stage_and_commit(&self.templates.library_dir, &dest, &placeholders)?;

        info!(
            "Library successfully created under: {}",
            path.join(&self.templates.initializer).display()
        );
        Ok(path)
    }

    /// Create a new operation, creating its library first if needed
    pub fn operation_create(
        &self,
        operations_dir: &Path,
        library_name: &str,
        operation_name: &str,
    ) -> Result<PathBuf> {
        validate_name(operation_name)?;

        if !self.library_exists(library_name, operations_dir)? {
            self.library_create(library_name, operations_dir)?;
        }

        let dest = operations_dir
            .join(library_dir_name(library_name)?)
            .join(operation_name);

        if self.operation_exists(operations_dir, library_name, operation_name)? {
            return Err(ScaffoldError::OperationAlreadyExists(dest));
        }

        let placeholders =
            Placeholders::new().with(OPERATION_MARKER, &to_camel_case(operation_name));

        let path = self.stage_and_commit(&self.templates.operation_dir, &dest, &placeholders)?;

        info!(
            "Operation successfully created under: {}",
            path.join(&self.templates.initializer).display()
        );
        Ok(path)
    }

    /// Sorted library names under `operations_dir`
    pub fn list_libraries(&self, operations_dir: &Path) -> Result<Vec<String>> {
        require_dir(operations_dir)?;
        list_dirs(operations_dir, |_| true)
    }

    /// Sorted operation names in a library
    pub fn list_operations(&self, operations_dir: &Path, library_name: &str) -> Result<Vec<String>> {
        let library_path = self.existing_library(operations_dir, library_name)?;
        list_dirs(&library_path, |dir| {
            dir.join(&self.templates.initializer).is_file()
        })
    }

    fn existing_library(&self, operations_dir: &Path, library_name: &str) -> Result<PathBuf> {
        if !self.library_exists(library_name, operations_dir)? {
            return Err(ScaffoldError::LibraryNotFound(
                operations_dir.join(library_name),
            ));
        }
        Ok(operations_dir.join(library_dir_name(library_name)?))
    }

    fn stage_and_commit(
        &self,
        template: &Path,
        dest: &Path,
        placeholders: &Placeholders,
    ) -> Result<PathBuf> {
        let staged = StagedTree::from_template(template, dest)?;
        replace_placeholders_in_file(
            &staged.path().join(&self.templates.initializer),
            placeholders,
        )?;
        staged.commit()
    }
}

/// On-disk directory name for a library
pub fn library_dir_name(name: &str) -> Result<String> {
    validate_name(name)?;
    Ok(name.to_lowercase())
}

/// Names must be a single, non-empty, normal path component that is not hidden
fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None)
            if !name.starts_with('.') && !name.contains(['/', '\\']) =>
        {
            Ok(())
        }
        _ => Err(ScaffoldError::InvalidName(name.to_string())),
    }
}

fn require_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ScaffoldError::NotFound(dir.to_path_buf()))
    }
}

fn list_dirs(parent: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || !path.is_dir() || !keep(&path) {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}
