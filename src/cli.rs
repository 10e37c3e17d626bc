// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `animdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "animdag",
    version,
    about = "Replay animation frame scripts through the per-frame job scheduler.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the replay script (TOML).
    ///
    /// Default: `Animdag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Animdag.toml")]
    pub script: String,

    /// Build every frame and print its job graph, but don't execute any job.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip per-frame graph validation, overriding `[runtime].validate_frames`.
    #[arg(long)]
    pub no_validate: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ANIMDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
