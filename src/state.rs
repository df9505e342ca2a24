//! Task lifecycle state.
//!
//! A task always sits in exactly one of three states. No transition rules are
//! enforced: any state can be set from any other.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Waiting,
    Todo,
    Done,
}

impl TaskState {
    /// Short label used in task summaries.
    pub const fn label(self) -> &'static str {
        match self {
            TaskState::Waiting => "Wait",
            TaskState::Todo => "Todo",
            TaskState::Done => "Done",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a state name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state '{0}', expected wait | todo | done")]
pub struct ParseTaskStateError(pub String);

impl FromStr for TaskState {
    type Err = ParseTaskStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wait" | "waiting" => Ok(TaskState::Waiting),
            "todo" => Ok(TaskState::Todo),
            "done" => Ok(TaskState::Done),
            _ => Err(ParseTaskStateError(s.to_string())),
        }
    }
}

/// Owned holder for a task's current state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskContext {
    state: TaskState,
}

impl TaskContext {
    pub fn new(state: TaskState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn set_state(&mut self, state: TaskState) {
        self.state = state;
    }
}

impl Default for TaskContext {
    /// New tasks start out waiting.
    fn default() -> Self {
        Self::new(TaskState::Waiting)
    }
}
