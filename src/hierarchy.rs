//! Users, groups and boards.
//!
//! Groups live in a single ordered registry owned by the navigator and are
//! never removed, so a [`GroupId`] (registry position) and a [`BoardRef`]
//! (group plus position inside that group) stay valid for the whole session.

use serde::Serialize;

/// Position of a group in the group registry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct GroupId(pub(crate) usize);

/// A board addressed through the group that owns it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct BoardRef {
    pub group: GroupId,
    pub(crate) index: usize,
}

/// A named board. Owned by exactly one group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Board {
    pub name: String,
}

impl Board {
    pub fn new(name: &str) -> Self {
        Board {
            name: name.to_string(),
        }
    }
}

/// A named group holding boards in insertion order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub boards: Vec<Board>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Group {
            name: name.to_string(),
            boards: Vec::new(),
        }
    }

    /// Append a board and return its position.
    pub fn add_board(&mut self, board: Board) -> usize {
        self.boards.push(board);
        self.boards.len() - 1
    }

    /// Position of the first board with this exact name.
    pub fn find_board(&self, name: &str) -> Option<usize> {
        self.boards.iter().position(|b| b.name == name)
    }
}

/// A user and the groups and boards it created.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub groups: Vec<GroupId>,
    pub boards: Vec<BoardRef>,
}

impl User {
    pub fn new(name: &str) -> Self {
        User {
            name: name.to_string(),
            groups: Vec::new(),
            boards: Vec::new(),
        }
    }
}
