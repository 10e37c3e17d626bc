// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{AnimatorEntry, RawScriptFile, ScriptFile};
use crate::errors::{AnimdagError, Result};

impl TryFrom<RawScriptFile> for ScriptFile {
    type Error = crate::errors::AnimdagError;

    fn try_from(raw: RawScriptFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_script(&raw)?;
        Ok(ScriptFile::new_unchecked(raw.scheduler, raw.runtime, raw.frames))
    }
}

fn validate_raw_script(script: &RawScriptFile) -> Result<()> {
    ensure_has_frames(script)?;
    validate_frame_times(script)?;
    validate_lifecycle_conflicts(script)?;
    Ok(())
}

fn ensure_has_frames(script: &RawScriptFile) -> Result<()> {
    if script.frames.is_empty() {
        return Err(AnimdagError::ConfigError(
            "script must contain at least one [[frame]] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_frame_times(script: &RawScriptFile) -> Result<()> {
    let mut previous: Option<f64> = None;

    for (index, frame) in script.frames.iter().enumerate() {
        if !frame.time.is_finite() {
            return Err(AnimdagError::ConfigError(format!(
                "frame {} has a non-finite time ({})",
                index, frame.time
            )));
        }

        match previous {
            Some(prev) if frame.time < prev => {
                return Err(AnimdagError::ConfigError(format!(
                    "frame {} time {} is earlier than the previous frame time {}",
                    index, frame.time, prev
                )));
            }
            _ => {}
        }
        previous = Some(frame.time);
    }

    Ok(())
}

fn validate_lifecycle_conflicts(script: &RawScriptFile) -> Result<()> {
    for (index, frame) in script.frames.iter().enumerate() {
        let started: HashSet<&AnimatorEntry> = frame.start.iter().collect();
        if let Some(entry) = frame.stop.iter().find(|entry| started.contains(entry)) {
            return Err(AnimdagError::ConfigError(format!(
                "frame {} both starts and stops {} animator {}",
                index, entry.animator, entry.node
            )));
        }
    }
    Ok(())
}
