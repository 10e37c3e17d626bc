// tests/script_loading.rs

mod common;
use crate::common::builders::{FrameBuilder, ScriptBuilder};

use std::io::Write;

use tempfile::NamedTempFile;

use animdag::config::{ScriptFile, load_and_validate, parse_and_validate};
use animdag::errors::AnimdagError;
use animdag::types::{AnimatorKind, DirtyDedup, DirtyFlag};

fn expect_config_error(result: Result<ScriptFile, AnimdagError>) -> String {
    match result {
        Err(AnimdagError::ConfigError(msg)) => msg,
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn full_script_loads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[scheduler]
dirty_dedup = "on_insert"
blend_build_waits_for_clip_load = true

[runtime]
validate_frames = false

[[frame]]
time = 0.0
dirty = [{{ flag = "clip", node = 1 }}, {{ flag = "blended_animator", node = 7 }}]
start = [{{ animator = "clip", node = 10 }}]

[[frame]]
time = 16.0
stop = [{{ animator = "clip", node = 10 }}]
"#
    )
    .unwrap();

    let script = load_and_validate(file.path()).unwrap();

    assert_eq!(script.scheduler.dirty_dedup, DirtyDedup::OnInsert);
    assert!(script.scheduler.blend_build_waits_for_clip_load);
    assert!(!script.runtime.validate_frames);
    assert_eq!(script.frames.len(), 2);
    assert_eq!(script.frames[0].dirty.len(), 2);
    assert_eq!(script.frames[0].dirty[1].flag, DirtyFlag::BlendedAnimatorDirty);
    assert_eq!(script.frames[0].start[0].animator, AnimatorKind::Clip);
    assert!(script.frames[1].dirty.is_empty());
    assert_eq!(script.frames[1].stop.len(), 1);
}

#[test]
fn sections_default_when_omitted() {
    let script = parse_and_validate(
        r#"
[[frame]]
time = 2.5
"#,
    )
    .unwrap();

    assert_eq!(script.scheduler.dirty_dedup, DirtyDedup::Keep);
    assert!(!script.scheduler.blend_build_waits_for_clip_load);
    assert!(script.runtime.validate_frames);
    assert_eq!(script.frames[0].time, 2.5);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = load_and_validate(dir.path().join("Animdag.toml"));

    assert!(matches!(result, Err(AnimdagError::IoError(_))));
}

#[test]
fn script_without_frames_is_rejected() {
    let msg = expect_config_error(parse_and_validate("[scheduler]\n"));
    assert!(msg.contains("at least one [[frame]]"));
}

#[test]
fn decreasing_frame_times_are_rejected() {
    let raw = ScriptBuilder::new()
        .with_frame(FrameBuilder::at(10.0).build())
        .with_frame(FrameBuilder::at(5.0).build())
        .build_raw();

    let msg = expect_config_error(ScriptFile::try_from(raw));
    assert!(msg.contains("frame 1"));
    assert!(msg.contains("earlier than the previous frame time"));
}

#[test]
fn equal_frame_times_are_allowed() {
    let raw = ScriptBuilder::new()
        .with_frame(FrameBuilder::at(3.0).build())
        .with_frame(FrameBuilder::at(3.0).build())
        .build_raw();

    assert!(ScriptFile::try_from(raw).is_ok());
}

#[test]
fn non_finite_frame_time_is_rejected() {
    let raw = ScriptBuilder::new()
        .with_frame(FrameBuilder::at(f64::NAN).build())
        .build_raw();

    let msg = expect_config_error(ScriptFile::try_from(raw));
    assert!(msg.contains("non-finite"));
}

#[test]
fn start_and_stop_in_one_frame_is_rejected() {
    let raw = ScriptBuilder::new()
        .with_frame(
            FrameBuilder::at(0.0)
                .start(AnimatorKind::Blended, 4)
                .stop(AnimatorKind::Blended, 4)
                .build(),
        )
        .build_raw();

    let msg = expect_config_error(ScriptFile::try_from(raw));
    assert!(msg.contains("both starts and stops blended animator node#4"));
}

#[test]
fn same_node_on_different_animator_kinds_is_fine() {
    let raw = ScriptBuilder::new()
        .with_frame(
            FrameBuilder::at(0.0)
                .start(AnimatorKind::Clip, 4)
                .stop(AnimatorKind::Blended, 4)
                .build(),
        )
        .build_raw();

    assert!(ScriptFile::try_from(raw).is_ok());
}

#[test]
fn unknown_dirty_flag_is_toml_error() {
    let result = parse_and_validate(
        r#"
[[frame]]
time = 0.0
dirty = [{ flag = "texture", node = 1 }]
"#,
    );

    assert!(matches!(result, Err(AnimdagError::TomlError(_))));
}

#[test]
fn flag_names_parse_from_strings() {
    for flag in DirtyFlag::ALL {
        assert_eq!(flag.to_string().parse::<DirtyFlag>(), Ok(flag));
    }
    assert_eq!("ON_INSERT".parse::<DirtyDedup>(), Ok(DirtyDedup::OnInsert));
    assert!("sometimes".parse::<DirtyDedup>().is_err());
}
