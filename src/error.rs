//! Error types for workspace operations.
//!
//! Every variant is recoverable: the console reports it and keeps reading
//! commands.

use std::fmt;

use thiserror::Error;

use crate::state::ParseTaskStateError;

/// Active selections an operation can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    User,
    UserAndGroup,
    UserAndBoard,
    UserGroupAndBoard,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Requirement::User => "User not logged in.",
            Requirement::UserAndGroup => {
                "User or group not available. Create user and group first."
            }
            Requirement::UserAndBoard => {
                "User or board not available. Create user and board first."
            }
            Requirement::UserGroupAndBoard => {
                "User, group, or board not available. Create user, group, and board first."
            }
        };
        f.write_str(msg)
    }
}

/// Kinds of named entity that can be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Group,
    Board,
    Task,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::User => "User",
            Entity::Group => "Group",
            Entity::Board => "Board",
            Entity::Task => "Task",
        })
    }
}

/// Errors returned by the workspace navigator and task creation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    /// A required active user, group or board is missing.
    #[error("{0}")]
    PreconditionNotMet(Requirement),

    /// A named lookup found nothing.
    #[error("{entity} '{name}' not found.")]
    NotFound { entity: Entity, name: String },

    /// The task kind tag is not one of code, social or business.
    #[error("Unknown task kind '{0}'. Expected code, social, or business.")]
    UnrecognizedKind(String),

    /// Wrong number of kind-specific arguments.
    #[error("{kind} task expects {expected} extra argument(s), got {found}.")]
    ShapeMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// A name was empty or whitespace.
    #[error("{0} name must not be empty.")]
    EmptyName(Entity),

    #[error(transparent)]
    InvalidState(#[from] ParseTaskStateError),
}

impl WorkspaceError {
    pub fn not_found(entity: Entity, name: &str) -> Self {
        WorkspaceError::NotFound {
            entity,
            name: name.to_string(),
        }
    }
}
