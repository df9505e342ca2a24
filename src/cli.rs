use clap::{Parser, ValueEnum};

use crate::cmd::Commands;

/// When to colour console output.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// In-memory task organiser driven from a command prompt.
/// Nothing is saved: every session starts empty.
#[derive(Parser, Debug)]
#[command(name = "tb", version, about = "Console task organiser: groups, boards and tasks")]
pub struct Cli {
    /// Creation date stamped on new tasks (YYYY-MM-DD).
    #[arg(long, global = true, conflicts_with = "today")]
    pub date: Option<String>,

    /// Stamp new tasks with today's local date.
    #[arg(long, global = true)]
    pub today: bool,

    /// Prompt shown before each command in interactive sessions.
    #[arg(long, global = true)]
    pub prompt: Option<String>,

    /// Colour output: auto | always | never.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Echo commands read from non-interactive input.
    #[arg(long, global = true)]
    pub echo: bool,

    /// Log filter, e.g. "debug" or "taskboard=trace". Falls back to RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
