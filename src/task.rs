//! Task data structure and related functionality.
//!
//! A task is a shared envelope (who created it, which board it was assigned to,
//! when, and its name) plus a kind-specific payload. The kind decides which
//! extra link, if any, the task carries.

use serde::Serialize;

use crate::state::{TaskContext, TaskState};

/// Fields every task kind is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonFields {
    pub assignee: String,
    pub assigned_to: String,
    pub date: String,
    pub name: String,
}

/// Kind-specific payload of a task.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaskKind {
    Code { repo_link: String },
    Social { design_link: String },
    Business,
}

impl TaskKind {
    /// Human readable label for the kind.
    pub const fn label(&self) -> &'static str {
        match self {
            TaskKind::Code { .. } => "Code",
            TaskKind::Social { .. } => "Social",
            TaskKind::Business => "Business",
        }
    }
}

/// A unit of work assigned to a board.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Task {
    name: String,
    assignee: String,
    assigned_to: String,
    date: String,
    #[serde(flatten)]
    kind: TaskKind,
    state: TaskContext,
}

impl Task {
    fn with_kind(common: CommonFields, kind: TaskKind) -> Self {
        let CommonFields {
            assignee,
            assigned_to,
            date,
            name,
        } = common;
        Task {
            name,
            assignee,
            assigned_to,
            date,
            kind,
            state: TaskContext::default(),
        }
    }

    /// Build a code task pointing at a repository.
    pub fn code(common: CommonFields, repo_link: String) -> Self {
        Self::with_kind(common, TaskKind::Code { repo_link })
    }

    /// Build a social task pointing at a design.
    pub fn social(common: CommonFields, design_link: String) -> Self {
        Self::with_kind(common, TaskKind::Social { design_link })
    }

    /// Build a business task. Business tasks carry no link.
    pub fn business(common: CommonFields) -> Self {
        Self::with_kind(common, TaskKind::Business)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Name of the board the task was created in.
    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn state(&self) -> TaskState {
        self.state.state()
    }

    pub fn set_state(&mut self, state: TaskState) {
        self.state.set_state(state);
    }

    /// One-line summary of the task.
    pub fn display_info(&self) -> String {
        let state = self.state();
        match &self.kind {
            TaskKind::Code { repo_link } => format!(
                "Code Task: {}, Assignee: {}, Repo Link: {}, State: {}",
                self.name, self.assignee, repo_link, state
            ),
            TaskKind::Social { design_link } => format!(
                "Social Task: {}, Assignee: {}, Design Link: {}, State: {}",
                self.name, self.assignee, design_link, state
            ),
            TaskKind::Business => format!(
                "Business Task: {}, Assignee: {}, State: {}",
                self.name, self.assignee, state
            ),
        }
    }
}
