use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Change category reported by upstream property-change notifications.
///
/// Each flag owns one dirty queue and resolves node ids through the matching
/// resource lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum DirtyFlag {
    #[serde(rename = "clip")]
    ClipDirty,
    #[serde(rename = "mappings")]
    MappingsDirty,
    #[serde(rename = "animator")]
    AnimatorDirty,
    #[serde(rename = "blended_animator")]
    BlendedAnimatorDirty,
}

impl DirtyFlag {
    pub const ALL: [DirtyFlag; 4] = [
        DirtyFlag::ClipDirty,
        DirtyFlag::MappingsDirty,
        DirtyFlag::AnimatorDirty,
        DirtyFlag::BlendedAnimatorDirty,
    ];
}

impl fmt::Display for DirtyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DirtyFlag::ClipDirty => "clip",
            DirtyFlag::MappingsDirty => "mappings",
            DirtyFlag::AnimatorDirty => "animator",
            DirtyFlag::BlendedAnimatorDirty => "blended_animator",
        };
        f.write_str(s)
    }
}

impl FromStr for DirtyFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clip" => Ok(DirtyFlag::ClipDirty),
            "mappings" => Ok(DirtyFlag::MappingsDirty),
            "animator" => Ok(DirtyFlag::AnimatorDirty),
            "blended_animator" => Ok(DirtyFlag::BlendedAnimatorDirty),
            other => Err(format!(
                "invalid dirty flag: {other} (expected \"clip\", \"mappings\", \"animator\" or \"blended_animator\")"
            )),
        }
    }
}

/// What the dirty router does when a handle is already queued.
///
/// - `Keep`: append anyway. Downstream jobs see the duplicate (default).
/// - `OnInsert`: skip handles already present in the flag's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirtyDedup {
    #[default]
    Keep,
    OnInsert,
}

impl FromStr for DirtyDedup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(DirtyDedup::Keep),
            "on_insert" => Ok(DirtyDedup::OnInsert),
            other => Err(format!(
                "invalid dirty_dedup: {other} (expected \"keep\" or \"on_insert\")"
            )),
        }
    }
}

/// Which running set a lifecycle call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatorKind {
    Clip,
    Blended,
}

impl fmt::Display for AnimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatorKind::Clip => f.write_str("clip"),
            AnimatorKind::Blended => f.write_str("blended"),
        }
    }
}
