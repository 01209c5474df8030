//! Errors raised while scaffolding

use std::path::PathBuf;
use thiserror::Error;

/// Errors specific to scaffolding operations
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Library not found: {}", .0.display())]
    LibraryNotFound(PathBuf),

    #[error("The library {name} already exists under {}", .dir.display())]
    LibraryAlreadyExists { name: String, dir: PathBuf },

    #[error("{} already exists.", .0.display())]
    OperationAlreadyExists(PathBuf),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid placeholder set: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
