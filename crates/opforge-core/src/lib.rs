//! opforge Core - Shared functionality for the opforge tools
//!
//! Standard locations and the persisted configuration file.

pub mod config;
pub mod paths;

pub use config::Config;
pub use paths::Paths;
