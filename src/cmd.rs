//! Subcommand implementations for the `tb` binary.
//!
//! Every subcommand drives the same [`Console`]; they differ only in where the
//! command lines come from.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use crossterm::tty::IsTty;
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::console::{Console, ConsoleError};

/// Sample session showing every task kind.
pub const DEMO_SCRIPT: &str = "\
create_user JohnDoe
create_group Development
go_group Development
create_board Sprint1
create_task code Task1 https://github.com/repo1
create_task social Task2 https://designs.com/design1
create_task business Task3
list_groups
list_boards
list_tasks
go_board Sprint1
list_tasks_in_current_board
exit
";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session (the default).
    Repl,

    /// Run commands from a file, one per line. Lines starting with '#' are skipped.
    Run {
        /// Path to the command script.
        script: PathBuf,
    },

    /// Run the built-in sample session.
    Demo,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Interactive session on stdin/stdout.
pub fn cmd_repl(config: &Config) -> Result<(), ConsoleError> {
    let stdin = io::stdin();
    let interactive = stdin.is_tty();
    let mut console = Console::new(config, io::stdout().lock());
    console.run(stdin.lock(), interactive)
}

/// Execute a command script.
pub fn cmd_run(config: &Config, script: &Path) -> Result<(), ConsoleError> {
    info!(script = %script.display(), "running script");
    let file = File::open(script)?;
    let mut console = Console::new(config, io::stdout().lock());
    console.run(BufReader::new(file), false)
}

/// Execute the sample session, always echoing each command.
pub fn cmd_demo(config: &Config) -> Result<(), ConsoleError> {
    let config = Config {
        echo: true,
        ..config.clone()
    };
    let mut console = Console::new(&config, io::stdout().lock());
    console.run(DEMO_SCRIPT.as_bytes(), false)
}

/// Print a completion script for `shell`.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
