//! # TB - Task Board Console
//!
//! An in-memory task organiser driven from a command prompt.
//!
//! ## Key Features
//!
//! - **Hierarchical Organisation**: Users create groups, groups hold boards, boards hold tasks
//! - **Typed Tasks**: Code tasks carry a repository link, social tasks a design link,
//!   business tasks nothing extra; every task has a Wait / Todo / Done state
//! - **Current Selections**: Commands act on the active user, group and board
//! - **Scriptable**: Run a file of commands or the built-in demo session
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive session
//! tb
//!
//! # Sample session
//! tb demo
//!
//! # Run a script, echoing each command
//! tb run setup.txt --echo
//! ```
//!
//! ## Session Example
//!
//! ```text
//! create_user alice
//! create_group Development
//! go_group Development
//! create_board Sprint1
//! create_task code Parser https://github.com/acme/parser
//! create_task business Budget
//! list_tasks_in_current_board
//! exit
//! ```
//!
//! Nothing is written to disk; every session starts empty.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod colors;
pub mod config;
pub mod console;
pub mod creation;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod navigator;
pub mod state;
pub mod task;

use cli::Cli;
use cmd::*;
use config::Config;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => cmd_repl(&config),
        Commands::Run { script } => cmd_run(&config, &script),
        Commands::Demo => cmd_demo(&config),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
