//! Task creation protocol.
//!
//! Callers pick a task kind by tag, get back the creator for that kind, and
//! wrap it in a [`CreateTaskCommand`] together with the common fields and any
//! kind-specific arguments. Executing the command builds the task.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use tracing::debug;

use crate::error::WorkspaceError;
use crate::task::{CommonFields, Task};

/// Builds one kind of task from common fields plus positional extras.
pub trait TaskCreator {
    /// Label of the kind this creator builds.
    fn kind(&self) -> &'static str;

    /// Number of extra arguments the kind needs.
    fn arity(&self) -> usize;

    /// Build the task. `extra` has already been checked against `arity`.
    fn build(&self, common: CommonFields, extra: Vec<String>) -> Task;

    /// Check the extra arguments and build the task.
    fn create(&self, common: CommonFields, extra: Vec<String>) -> Result<Task, WorkspaceError> {
        if extra.len() != self.arity() {
            return Err(WorkspaceError::ShapeMismatch {
                kind: self.kind(),
                expected: self.arity(),
                found: extra.len(),
            });
        }
        Ok(self.build(common, extra))
    }
}

/// Creator for code tasks. Takes the repository link.
pub struct CodeTaskCreator;

/// Creator for social tasks. Takes the design link.
pub struct SocialTaskCreator;

/// Creator for business tasks. Takes nothing extra.
pub struct BusinessTaskCreator;

impl TaskCreator for CodeTaskCreator {
    fn kind(&self) -> &'static str {
        "Code"
    }

    fn arity(&self) -> usize {
        1
    }

    fn build(&self, common: CommonFields, extra: Vec<String>) -> Task {
        let repo_link = extra.into_iter().next().unwrap_or_default();
        Task::code(common, repo_link)
    }
}

impl TaskCreator for SocialTaskCreator {
    fn kind(&self) -> &'static str {
        "Social"
    }

    fn arity(&self) -> usize {
        1
    }

    fn build(&self, common: CommonFields, extra: Vec<String>) -> Task {
        let design_link = extra.into_iter().next().unwrap_or_default();
        Task::social(common, design_link)
    }
}

impl TaskCreator for BusinessTaskCreator {
    fn kind(&self) -> &'static str {
        "Business"
    }

    fn arity(&self) -> usize {
        0
    }

    fn build(&self, common: CommonFields, _extra: Vec<String>) -> Task {
        Task::business(common)
    }
}

/// Tag naming a task kind on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TaskKindTag {
    Code,
    Social,
    Business,
}

impl TaskKindTag {
    /// The creator for this kind. All kind dispatch happens here.
    pub fn creator(self) -> &'static dyn TaskCreator {
        match self {
            TaskKindTag::Code => &CodeTaskCreator,
            TaskKindTag::Social => &SocialTaskCreator,
            TaskKindTag::Business => &BusinessTaskCreator,
        }
    }
}

impl fmt::Display for TaskKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.creator().kind())
    }
}

impl FromStr for TaskKindTag {
    type Err = WorkspaceError;

    /// Tags are matched exactly: `code`, `social` or `business`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <TaskKindTag as ValueEnum>::from_str(s, false)
            .map_err(|_| WorkspaceError::UnrecognizedKind(s.to_string()))
    }
}

/// A deferred request to build one task.
pub struct CreateTaskCommand {
    creator: &'static dyn TaskCreator,
    common: CommonFields,
    extra: Vec<String>,
}

impl CreateTaskCommand {
    pub fn new(
        creator: &'static dyn TaskCreator,
        common: CommonFields,
        extra: Vec<String>,
    ) -> Self {
        Self {
            creator,
            common,
            extra,
        }
    }

    /// Build the task. Consumes the command so it runs at most once.
    pub fn execute(self) -> Result<Task, WorkspaceError> {
        debug!(
            kind = self.creator.kind(),
            name = %self.common.name,
            "executing create-task command"
        );
        self.creator.create(self.common, self.extra)
    }
}
