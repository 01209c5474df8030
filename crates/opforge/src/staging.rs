//! Stage-then-commit directory creation
//!
//! A template is copied into a temporary directory next to its destination,
//! customized there, and moved into place with a single rename. The staging
//! directory is removed when the [`StagedTree`] is dropped, committed or not.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

const STAGING_PREFIX: &str = ".opforge-staging-";

/// A template copy waiting to be committed to `dest`
#[derive(Debug)]
pub struct StagedTree {
    staging: TempDir,
    tree: PathBuf,
    dest: PathBuf,
}

impl StagedTree {
    /// Copy `template` into a fresh staging directory beside `dest`.
    ///
    /// The parent of `dest` must already exist.
    pub fn from_template(template: &Path, dest: &Path) -> Result<Self> {
        if !template.is_dir() {
            return Err(ScaffoldError::NotFound(template.to_path_buf()));
        }

        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(ScaffoldError::NotFound(parent.to_path_buf()));
        }

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(parent)?;
        let tree = staging.path().join("tree");
        copy_tree(template, &tree)?;

        debug!(
            template = %template.display(),
            staging = %tree.display(),
            "staged template"
        );

        Ok(Self {
            staging,
            tree,
            dest: dest.to_path_buf(),
        })
    }

    /// Root of the staged copy
    pub fn path(&self) -> &Path {
        &self.tree
    }

    /// Move the staged tree to its destination.
    ///
    /// Fails with [`ScaffoldError::AlreadyExists`] if the destination exists
    /// at commit time. The check and the rename are separate calls: an empty
    /// directory created between them is replaced by the rename on Linux,
    /// while a non-empty one makes the rename fail.
    pub fn commit(self) -> Result<PathBuf> {
        if self.dest.exists() {
            return Err(ScaffoldError::AlreadyExists(self.dest));
        }
        fs::rename(&self.tree, &self.dest)?;
        debug!(
            staging = %self.staging.path().display(),
            dest = %self.dest.display(),
            "committed staged tree"
        );
        Ok(self.dest)
    }
}

/// Recursively copy a directory
pub(crate) fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel_path = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| ScaffoldError::NotFound(entry.path().to_path_buf()))?;
        let dest_path = dst.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else {
            // fs::copy carries the permission bits, executables included
            fs::copy(entry.path(), &dest_path)?;
        }
    }

    Ok(())
}
