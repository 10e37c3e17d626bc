// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The scheduler operations themselves never fail; these errors come from
//! loading replay scripts and from validating a built frame.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnimdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Job {job} depends on {dependency}, which is not part of the frame")]
    DanglingDependency { job: String, dependency: String },

    #[error("Cycle detected in frame job graph: {0}")]
    DependencyCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, AnimdagError>;
