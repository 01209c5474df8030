//! opforge - Scaffolding for operation libraries
//!
//! A library is a directory of operations; an operation is a directory with an
//! initializer file generated from a template. Creating either one is "copy
//! the template, replace a marker, move it into place."

pub mod error;
pub mod placeholders;
pub mod scaffolder;
pub mod staging;
pub mod templates;

pub use error::{Result, ScaffoldError};
pub use placeholders::{replace_placeholders_in_file, to_camel_case, Placeholders};
pub use scaffolder::Scaffolder;
pub use staging::StagedTree;
pub use templates::{init_templates, TemplateSet};
