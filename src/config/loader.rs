// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawScriptFile, ScriptFile};
use crate::errors::Result;

/// Load a replay script from a given path and return the raw `RawScriptFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (frame ordering, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawScriptFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let script: RawScriptFile = toml::from_str(&contents)?;

    Ok(script)
}

/// Load a replay script from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - an empty script,
///   - non-finite or decreasing frame times,
///   - an animator started and stopped in the same frame.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ScriptFile> {
    let raw_script = load_from_path(&path)?;
    let script = ScriptFile::try_from(raw_script)?;
    Ok(script)
}

/// Same as [`load_and_validate`], for a script already in memory.
pub fn parse_and_validate(contents: &str) -> Result<ScriptFile> {
    let raw_script: RawScriptFile = toml::from_str(contents)?;
    ScriptFile::try_from(raw_script)
}
