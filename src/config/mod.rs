// src/config/mod.rs

//! Replay scripts and scheduler options.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a script from disk (`loader.rs`).
//! - Validate basic invariants like frame ordering (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_and_validate};
pub use model::{
    AnimatorEntry, DirtyEntry, FrameScript, RawScriptFile, RuntimeSection, SchedulerConfig,
    ScriptFile,
};
