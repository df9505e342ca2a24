//! Line-oriented command console.
//!
//! Each input line is split on whitespace; the first token names a command and
//! the rest are its positional arguments. Commands run against a single
//! [`Navigator`] owned by the console. Failures are reported on the output and
//! the session carries on; only I/O errors end it early.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{info, warn};

use crate::colors::{self, Palette};
use crate::config::Config;
use crate::error::WorkspaceError;
use crate::navigator::Navigator;
use crate::state::TaskState;

/// Errors raised while handling one console line.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Invalid command. Please try again.")]
    UnknownCommand(String),

    #[error("{command} expects {args}")]
    MissingArguments {
        command: &'static str,
        args: &'static str,
    },

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Names of the console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    CreateUser,
    LoginUser,
    CreateGroup,
    GoGroup,
    CreateBoard,
    GoBoard,
    CreateTask,
    SetTaskState,
    ListGroups,
    ListBoards,
    ListTasks,
    ListBoardsInCurrentGroup,
    ListTasksInCurrentBoard,
    ExportJson,
    Help,
    Exit,
}

impl CommandName {
    pub const ALL: [CommandName; 16] = [
        CommandName::CreateUser,
        CommandName::LoginUser,
        CommandName::CreateGroup,
        CommandName::GoGroup,
        CommandName::CreateBoard,
        CommandName::GoBoard,
        CommandName::CreateTask,
        CommandName::SetTaskState,
        CommandName::ListGroups,
        CommandName::ListBoards,
        CommandName::ListTasks,
        CommandName::ListBoardsInCurrentGroup,
        CommandName::ListTasksInCurrentBoard,
        CommandName::ExportJson,
        CommandName::Help,
        CommandName::Exit,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandName::CreateUser => "create_user",
            CommandName::LoginUser => "login_user",
            CommandName::CreateGroup => "create_group",
            CommandName::GoGroup => "go_group",
            CommandName::CreateBoard => "create_board",
            CommandName::GoBoard => "go_board",
            CommandName::CreateTask => "create_task",
            CommandName::SetTaskState => "set_task_state",
            CommandName::ListGroups => "list_groups",
            CommandName::ListBoards => "list_boards",
            CommandName::ListTasks => "list_tasks",
            CommandName::ListBoardsInCurrentGroup => "list_boards_in_current_group",
            CommandName::ListTasksInCurrentBoard => "list_tasks_in_current_board",
            CommandName::ExportJson => "export_json",
            CommandName::Help => "help",
            CommandName::Exit => "exit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Positional arguments, empty for commands that take none.
    pub const fn args(self) -> &'static str {
        match self {
            CommandName::CreateUser
            | CommandName::LoginUser
            | CommandName::CreateGroup
            | CommandName::CreateBoard => "<name>",
            CommandName::GoGroup => "<group_name>",
            CommandName::GoBoard => "<board_name>",
            CommandName::CreateTask => "<code|social|business> <name> [link]",
            CommandName::SetTaskState => "<task_name> <wait|todo|done>",
            _ => "",
        }
    }

    /// Full usage line, command name included.
    pub fn usage(self) -> String {
        format!("{} {}", self.as_str(), self.args()).trim_end().to_string()
    }

    const fn min_args(self) -> usize {
        match self {
            CommandName::CreateUser
            | CommandName::LoginUser
            | CommandName::CreateGroup
            | CommandName::GoGroup
            | CommandName::CreateBoard
            | CommandName::GoBoard => 1,
            CommandName::CreateTask | CommandName::SetTaskState => 2,
            _ => 0,
        }
    }

    const fn about(self) -> &'static str {
        match self {
            CommandName::CreateUser => "create a user and make it active",
            CommandName::LoginUser => "switch to an existing user",
            CommandName::CreateGroup => "create a group",
            CommandName::GoGroup => "enter a group",
            CommandName::CreateBoard => "create a board in the current group and enter it",
            CommandName::GoBoard => "enter a board of the current group",
            CommandName::CreateTask => "create a task in the current board",
            CommandName::SetTaskState => "change the state of a task in the current board",
            CommandName::ListGroups => "groups created by the current user",
            CommandName::ListBoards => "boards created by the current user",
            CommandName::ListTasks => "every task",
            CommandName::ListBoardsInCurrentGroup => "boards of the current group",
            CommandName::ListTasksInCurrentBoard => "tasks of the current board",
            CommandName::ExportJson => "print the whole workspace as JSON",
            CommandName::Help => "show this list",
            CommandName::Exit => "leave the console",
        }
    }
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateUser(String),
    LoginUser(String),
    CreateGroup(String),
    GoGroup(String),
    CreateBoard(String),
    GoBoard(String),
    CreateTask {
        kind: String,
        name: String,
        extra: Vec<String>,
    },
    SetTaskState {
        name: String,
        state: String,
    },
    ListGroups,
    ListBoards,
    ListTasks,
    ListBoardsInCurrentGroup,
    ListTasksInCurrentBoard,
    ExportJson,
    Help,
    Exit,
}

fn next_arg(args: &mut impl Iterator<Item = String>) -> String {
    args.next().unwrap_or_default()
}

/// Parse one input line. Blank lines yield `None`.
///
/// Arguments beyond what a command uses are ignored, except for
/// `create_task`, which passes them on as kind-specific extras.
pub fn parse_line(line: &str) -> Result<Option<Command>, ConsoleError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };
    let name = CommandName::from_name(first)
        .ok_or_else(|| ConsoleError::UnknownCommand(first.to_string()))?;
    let args: Vec<String> = tokens.map(str::to_string).collect();
    if args.len() < name.min_args() {
        return Err(ConsoleError::MissingArguments {
            command: name.as_str(),
            args: name.args(),
        });
    }

    let mut args = args.into_iter();
    let command = match name {
        CommandName::CreateUser => Command::CreateUser(next_arg(&mut args)),
        CommandName::LoginUser => Command::LoginUser(next_arg(&mut args)),
        CommandName::CreateGroup => Command::CreateGroup(next_arg(&mut args)),
        CommandName::GoGroup => Command::GoGroup(next_arg(&mut args)),
        CommandName::CreateBoard => Command::CreateBoard(next_arg(&mut args)),
        CommandName::GoBoard => Command::GoBoard(next_arg(&mut args)),
        CommandName::CreateTask => Command::CreateTask {
            kind: next_arg(&mut args),
            name: next_arg(&mut args),
            extra: args.collect(),
        },
        CommandName::SetTaskState => Command::SetTaskState {
            name: next_arg(&mut args),
            state: next_arg(&mut args),
        },
        CommandName::ListGroups => Command::ListGroups,
        CommandName::ListBoards => Command::ListBoards,
        CommandName::ListTasks => Command::ListTasks,
        CommandName::ListBoardsInCurrentGroup => Command::ListBoardsInCurrentGroup,
        CommandName::ListTasksInCurrentBoard => Command::ListTasksInCurrentBoard,
        CommandName::ExportJson => Command::ExportJson,
        CommandName::Help => Command::Help,
        CommandName::Exit => Command::Exit,
    };
    Ok(Some(command))
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A console session writing to `W`.
pub struct Console<W: Write> {
    nav: Navigator,
    out: W,
    palette: Palette,
    prompt: String,
    echo: bool,
}

impl<W: Write> Console<W> {
    pub fn new(config: &Config, out: W) -> Self {
        Console {
            nav: Navigator::new(config.task_date.clone()),
            out,
            palette: Palette::new(config.color),
            prompt: config.prompt.clone(),
            echo: config.echo,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    fn header(&mut self, line: &str) -> io::Result<()> {
        let painted = self.palette.paint(line, colors::ACCENT);
        self.say(&painted)
    }

    fn report(&mut self, err: &ConsoleError) -> io::Result<()> {
        let painted = self.palette.paint(&format!("Error: {err}"), colors::ERROR);
        self.say(&painted)
    }

    /// Handle one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ConsoleError> {
        let outcome = match parse_line(line) {
            Ok(None) => return Ok(Flow::Continue),
            Ok(Some(command)) => self.dispatch(command),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(flow) => Ok(flow),
            Err(ConsoleError::Io(e)) => Err(ConsoleError::Io(e)),
            Err(e) => {
                warn!(line = line.trim(), error = %e, "command rejected");
                self.report(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, ConsoleError> {
        match command {
            Command::CreateUser(name) => {
                self.nav.create_user(&name)?;
                self.say(&format!("User '{name}' created."))?;
            }
            Command::LoginUser(name) => {
                self.nav.login_user(&name)?;
                self.say(&format!("User '{name}' logged in."))?;
            }
            Command::CreateGroup(name) => {
                self.nav.create_group(&name)?;
                self.say(&format!("Group '{name}' created."))?;
            }
            Command::GoGroup(name) => {
                self.nav.enter_group(&name)?;
                self.say(&format!("Entered group '{name}'."))?;
            }
            Command::CreateBoard(name) => {
                self.nav.create_board(&name)?;
                self.say(&format!("Board '{name}' created."))?;
            }
            Command::GoBoard(name) => {
                self.nav.enter_board(&name)?;
                self.say(&format!("Entered board '{name}'."))?;
            }
            Command::CreateTask { kind, name, extra } => {
                let task = self.nav.create_task(&kind, &name, extra)?;
                let msg = format!(
                    "{} task '{}' created in board '{}'.",
                    task.kind().label(),
                    task.name(),
                    task.assigned_to()
                );
                self.say(&msg)?;
            }
            Command::SetTaskState { name, state } => {
                let state = state.parse::<TaskState>().map_err(WorkspaceError::from)?;
                self.nav.set_task_state(&name, state)?;
                self.say(&format!("Task '{name}' is now {state}."))?;
            }
            Command::ListGroups => {
                let names: Vec<String> =
                    self.nav.list_groups()?.iter().map(|g| g.name.clone()).collect();
                let header = format!("Groups for user '{}':", self.active_user_name());
                self.print_owned_list(&header, "No groups found.", &names)?;
            }
            Command::ListBoards => {
                let names: Vec<String> =
                    self.nav.list_boards()?.iter().map(|b| b.name.clone()).collect();
                let header = format!("Boards for user '{}':", self.active_user_name());
                self.print_owned_list(&header, "No boards found.", &names)?;
            }
            Command::ListTasks => {
                let lines = self.task_lines(self.nav.list_tasks()?.iter());
                let user = self.active_user_name();
                self.print_list(&format!("Tasks for user '{user}':"), &lines)?;
            }
            Command::ListBoardsInCurrentGroup => {
                let names: Vec<String> =
                    self.nav.list_boards_in_group()?.iter().map(|b| b.name.clone()).collect();
                let group = self.nav.active_group().map(|g| g.name.clone()).unwrap_or_default();
                self.print_list(&format!("Boards in group '{group}':"), &names)?;
            }
            Command::ListTasksInCurrentBoard => {
                let lines = self.task_lines(self.nav.list_tasks_in_board()?);
                let board = self.nav.active_board().map(|b| b.name.clone()).unwrap_or_default();
                self.print_list(&format!("Tasks in board '{board}':"), &lines)?;
            }
            Command::ExportJson => {
                let json = serde_json::to_string_pretty(&self.nav.snapshot())?;
                self.say(&json)?;
            }
            Command::Help => self.print_help()?,
            Command::Exit => {
                self.say("Exiting console.")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn active_user_name(&self) -> String {
        self.nav.active_user().map(|u| u.name.clone()).unwrap_or_default()
    }

    fn task_lines<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a crate::task::Task>,
    ) -> Vec<String> {
        tasks
            .into_iter()
            .map(|t| self.palette.paint(&t.display_info(), colors::kind_color(t.kind())))
            .collect()
    }

    fn print_list(&mut self, header: &str, lines: &[String]) -> io::Result<()> {
        self.header(header)?;
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    /// Per-user listings print a fallback line instead of an empty list.
    fn print_owned_list(&mut self, header: &str, empty: &str, lines: &[String]) -> io::Result<()> {
        if lines.is_empty() {
            return self.say(empty);
        }
        self.print_list(header, lines)
    }

    fn print_help(&mut self) -> io::Result<()> {
        self.header("Commands:")?;
        for name in CommandName::ALL {
            let line = format!("  {:<50} {}", name.usage(), name.about());
            self.say(&line)?;
        }
        Ok(())
    }

    /// Read and execute commands until `exit` or end of input.
    ///
    /// Interactive sessions show the prompt before each line; otherwise the
    /// prompt and the command are echoed only when echo is enabled.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> Result<(), ConsoleError> {
        info!(interactive, "console session started");
        self.say("Welcome to Task Manager Console!")?;
        let mut lines = input.lines();
        loop {
            if interactive {
                let prompt = self.palette.paint(&self.prompt, colors::ACCENT);
                write!(self.out, "{prompt}")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if !interactive && line.trim_start().starts_with('#') {
                continue;
            }
            if self.echo && !interactive && !line.trim().is_empty() {
                let echoed = format!("{}{}", self.prompt, line.trim());
                self.say(&echoed)?;
            }
            if self.execute_line(&line)? == Flow::Exit {
                info!("console session ended by exit");
                return Ok(());
            }
        }
        if interactive {
            writeln!(self.out)?;
        }
        self.say("Exiting console.")?;
        info!("console session ended at end of input");
        Ok(())
    }
}
