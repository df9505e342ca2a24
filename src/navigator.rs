//! Workspace navigation and task bookkeeping.
//!
//! The [`Navigator`] owns every user, group, board and task of a session and
//! tracks the active user, group and board. Scoped operations check those
//! selections first and return [`WorkspaceError::PreconditionNotMet`] without
//! touching any state when one is missing.

use serde::Serialize;
use tracing::debug;

use crate::creation::{CreateTaskCommand, TaskKindTag};
use crate::error::{Entity, Requirement, WorkspaceError};
use crate::hierarchy::{Board, BoardRef, Group, GroupId, User};
use crate::state::TaskState;
use crate::task::{CommonFields, Task};

/// Creation date stamped on tasks when none is configured.
pub const DEFAULT_TASK_DATE: &str = "2023-01-01";

/// Session state: registries plus the active selections.
#[derive(Debug)]
pub struct Navigator {
    users: Vec<User>,
    groups: Vec<Group>,
    tasks: Vec<Task>,
    active_user: Option<usize>,
    active_group: Option<GroupId>,
    active_board: Option<BoardRef>,
    task_date: String,
}

/// Read-only, serializable view of a navigator.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub active_user: Option<&'a str>,
    pub active_group: Option<&'a str>,
    pub active_board: Option<&'a str>,
    pub users: &'a [User],
    pub groups: &'a [Group],
    pub tasks: &'a [Task],
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new(DEFAULT_TASK_DATE)
    }
}

fn require_name(entity: Entity, name: &str) -> Result<(), WorkspaceError> {
    if name.trim().is_empty() {
        return Err(WorkspaceError::EmptyName(entity));
    }
    Ok(())
}

impl Navigator {
    /// Create an empty workspace that stamps new tasks with `task_date`.
    pub fn new(task_date: impl Into<String>) -> Self {
        Navigator {
            users: Vec::new(),
            groups: Vec::new(),
            tasks: Vec::new(),
            active_user: None,
            active_group: None,
            active_board: None,
            task_date: task_date.into(),
        }
    }

    // ---- accessors ----

    pub fn active_user(&self) -> Option<&User> {
        self.active_user.map(|i| &self.users[i])
    }

    pub fn active_group(&self) -> Option<&Group> {
        self.active_group.map(|id| self.group(id))
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.active_board.map(|r| self.board(r))
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Every task ever created, in creation order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    fn board(&self, r: BoardRef) -> &Board {
        &self.groups[r.group.0].boards[r.index]
    }

    // ---- preconditions ----

    fn require_user(&self) -> Result<usize, WorkspaceError> {
        self.active_user
            .ok_or(WorkspaceError::PreconditionNotMet(Requirement::User))
    }

    fn require_user_and_group(&self) -> Result<(usize, GroupId), WorkspaceError> {
        match (self.active_user, self.active_group) {
            (Some(u), Some(g)) => Ok((u, g)),
            _ => Err(WorkspaceError::PreconditionNotMet(Requirement::UserAndGroup)),
        }
    }

    fn require_user_and_board(&self) -> Result<(usize, BoardRef), WorkspaceError> {
        match (self.active_user, self.active_board) {
            (Some(u), Some(b)) => Ok((u, b)),
            _ => Err(WorkspaceError::PreconditionNotMet(Requirement::UserAndBoard)),
        }
    }

    fn require_user_group_and_board(&self) -> Result<(usize, BoardRef), WorkspaceError> {
        match (self.active_user, self.active_group, self.active_board) {
            (Some(u), Some(g), Some(b)) if b.group == g => Ok((u, b)),
            _ => Err(WorkspaceError::PreconditionNotMet(
                Requirement::UserGroupAndBoard,
            )),
        }
    }

    // ---- users ----

    /// Make a fresh user with this name the active user.
    ///
    /// A registered user with the same name is replaced. Active group and
    /// board selections are left as they are.
    pub fn create_user(&mut self, name: &str) -> Result<&User, WorkspaceError> {
        require_name(Entity::User, name)?;
        let user = User::new(name);
        let idx = match self.users.iter().position(|u| u.name == name) {
            Some(i) => {
                self.users[i] = user;
                i
            }
            None => {
                self.users.push(user);
                self.users.len() - 1
            }
        };
        self.active_user = Some(idx);
        debug!(user = name, "created user");
        Ok(&self.users[idx])
    }

    /// Switch the active user to a previously created one.
    pub fn login_user(&mut self, name: &str) -> Result<&User, WorkspaceError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.name == name)
            .ok_or_else(|| WorkspaceError::not_found(Entity::User, name))?;
        self.active_user = Some(idx);
        debug!(user = name, "logged in");
        Ok(&self.users[idx])
    }

    // ---- groups ----

    /// Register a new group, crediting it to the active user if any.
    pub fn create_group(&mut self, name: &str) -> Result<&Group, WorkspaceError> {
        require_name(Entity::Group, name)?;
        let id = GroupId(self.groups.len());
        self.groups.push(Group::new(name));
        if let Some(u) = self.active_user {
            self.users[u].groups.push(id);
        }
        debug!(group = name, "created group");
        Ok(self.group(id))
    }

    /// Enter the first group with this exact name.
    ///
    /// An active board from another group is cleared.
    pub fn enter_group(&mut self, name: &str) -> Result<&Group, WorkspaceError> {
        let id = self
            .groups
            .iter()
            .position(|g| g.name == name)
            .map(GroupId)
            .ok_or_else(|| WorkspaceError::not_found(Entity::Group, name))?;
        if self.active_board.is_some_and(|b| b.group != id) {
            debug!("clearing board selection from previous group");
            self.active_board = None;
        }
        self.active_group = Some(id);
        debug!(group = name, "entered group");
        Ok(self.group(id))
    }

    // ---- boards ----

    /// Create a board in the active group and make it the active board.
    pub fn create_board(&mut self, name: &str) -> Result<&Board, WorkspaceError> {
        let (user, group) = self.require_user_and_group()?;
        require_name(Entity::Board, name)?;
        let index = self.groups[group.0].add_board(Board::new(name));
        let board = BoardRef { group, index };
        self.users[user].boards.push(board);
        self.active_board = Some(board);
        debug!(board = name, group = %self.group(group).name, "created board");
        Ok(self.board(board))
    }

    /// Enter the first board of the active group with this exact name.
    pub fn enter_board(&mut self, name: &str) -> Result<&Board, WorkspaceError> {
        let (_, group) = self.require_user_and_group()?;
        let index = self
            .group(group)
            .find_board(name)
            .ok_or_else(|| WorkspaceError::not_found(Entity::Board, name))?;
        let board = BoardRef { group, index };
        self.active_board = Some(board);
        debug!(board = name, "entered board");
        Ok(self.board(board))
    }

    // ---- tasks ----

    /// Create a task of the given kind in the active board.
    ///
    /// `kind` is one of `code`, `social` or `business`; `extra` carries the
    /// kind-specific arguments (a link for code and social tasks).
    pub fn create_task(
        &mut self,
        kind: &str,
        name: &str,
        extra: Vec<String>,
    ) -> Result<&Task, WorkspaceError> {
        let (user, board) = self.require_user_group_and_board()?;
        let tag: TaskKindTag = kind.parse()?;
        require_name(Entity::Task, name)?;

        let common = CommonFields {
            assignee: self.users[user].name.clone(),
            assigned_to: self.board(board).name.clone(),
            date: self.task_date.clone(),
            name: name.to_string(),
        };
        let task = CreateTaskCommand::new(tag.creator(), common, extra).execute()?;
        debug!(
            kind = %tag,
            task = name,
            board = task.assigned_to(),
            date = task.date(),
            "created task"
        );
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Set the state of the first task with this name in the active board.
    pub fn set_task_state(
        &mut self,
        name: &str,
        state: TaskState,
    ) -> Result<&Task, WorkspaceError> {
        let (_, board) = self.require_user_and_board()?;
        let board_name = &self.groups[board.group.0].boards[board.index].name;
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.assigned_to() == board_name && t.name() == name)
            .ok_or_else(|| WorkspaceError::not_found(Entity::Task, name))?;
        task.set_state(state);
        debug!(task = name, state = %state, "changed task state");
        Ok(&*task)
    }

    // ---- listings ----

    /// Groups created by the active user.
    pub fn list_groups(&self) -> Result<Vec<&Group>, WorkspaceError> {
        let user = self.require_user()?;
        Ok(self.users[user].groups.iter().map(|&g| self.group(g)).collect())
    }

    /// Boards created by the active user.
    pub fn list_boards(&self) -> Result<Vec<&Board>, WorkspaceError> {
        let user = self.require_user()?;
        Ok(self.users[user].boards.iter().map(|&b| self.board(b)).collect())
    }

    /// The whole task registry. Not scoped to the active user.
    pub fn list_tasks(&self) -> Result<&[Task], WorkspaceError> {
        self.require_user()?;
        Ok(&self.tasks)
    }

    /// Boards of the active group.
    pub fn list_boards_in_group(&self) -> Result<&[Board], WorkspaceError> {
        let (_, group) = self.require_user_and_group()?;
        Ok(&self.group(group).boards)
    }

    /// Tasks assigned to the active board's name, in creation order.
    pub fn list_tasks_in_board(&self) -> Result<Vec<&Task>, WorkspaceError> {
        let (_, board) = self.require_user_and_board()?;
        let board_name = &self.board(board).name;
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.assigned_to() == board_name)
            .collect())
    }

    /// Serializable view of the whole workspace.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            active_user: self.active_user().map(|u| u.name.as_str()),
            active_group: self.active_group().map(|g| g.name.as_str()),
            active_board: self.active_board().map(|b| b.name.as_str()),
            users: self.users(),
            groups: &self.groups,
            tasks: &self.tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;
    use rstest::{fixture, rstest};

    fn extra(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// User `alice` in group `dev` with active board `sprint`.
    #[fixture]
    fn ready() -> Navigator {
        let mut nav = Navigator::default();
        nav.create_user("alice").unwrap();
        nav.create_group("dev").unwrap();
        nav.enter_group("dev").unwrap();
        nav.create_board("sprint").unwrap();
        nav
    }

    fn task_names<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a str> {
        tasks.into_iter().map(|t| t.name()).collect()
    }

    #[test]
    fn test_groups_registered_in_call_order() {
        let mut nav = Navigator::default();
        for name in ["a", "b", "c", "d"] {
            nav.create_group(name).unwrap();
        }
        let names: Vec<&str> = nav.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_create_group_without_user_is_not_owned() {
        let mut nav = Navigator::default();
        nav.create_group("dev").unwrap();
        nav.create_user("alice").unwrap();
        assert!(nav.list_groups().unwrap().is_empty());
        assert_eq!(nav.groups().len(), 1);
    }

    #[test]
    fn test_create_board_requires_user_and_group() {
        let mut nav = Navigator::default();
        assert_eq!(
            nav.create_board("b").unwrap_err(),
            WorkspaceError::PreconditionNotMet(Requirement::UserAndGroup)
        );

        nav.create_user("alice").unwrap();
        nav.create_group("dev").unwrap();
        assert!(nav.create_board("b").is_err());
        assert!(nav.groups()[0].boards.is_empty());
        assert!(nav.active_board().is_none());
        assert!(nav.list_boards().unwrap().is_empty());
    }

    #[test]
    fn test_create_board_without_user_does_not_mutate() {
        let mut nav = Navigator::default();
        nav.create_group("dev").unwrap();
        nav.enter_group("dev").unwrap();
        assert!(nav.create_board("b").is_err());
        assert!(nav.groups()[0].boards.is_empty());
    }

    #[rstest]
    fn test_create_board_selects_it(ready: Navigator) {
        assert_eq!(ready.active_board().map(|b| b.name.as_str()), Some("sprint"));
        assert_eq!(ready.list_boards().unwrap().len(), 1);
        assert_eq!(ready.list_boards_in_group().unwrap().len(), 1);
    }

    #[rstest]
    fn test_enter_unknown_board_keeps_selection(mut ready: Navigator) {
        assert_eq!(
            ready.enter_board("nope").unwrap_err(),
            WorkspaceError::not_found(Entity::Board, "nope")
        );
        assert_eq!(ready.active_board().unwrap().name, "sprint");
    }

    #[rstest]
    fn test_enter_board_switches(mut ready: Navigator) {
        ready.create_board("backlog").unwrap();
        ready.enter_board("sprint").unwrap();
        assert_eq!(ready.active_board().unwrap().name, "sprint");
    }

    #[test]
    fn test_enter_board_requires_group() {
        let mut nav = Navigator::default();
        nav.create_user("alice").unwrap();
        assert_eq!(
            nav.enter_board("x").unwrap_err(),
            WorkspaceError::PreconditionNotMet(Requirement::UserAndGroup)
        );
    }

    #[test]
    fn test_enter_group_does_not_need_user() {
        let mut nav = Navigator::default();
        nav.create_group("dev").unwrap();
        assert_eq!(nav.enter_group("dev").unwrap().name, "dev");
        assert!(nav.enter_group("ops").is_err());
        assert_eq!(nav.active_group().unwrap().name, "dev");
    }

    #[rstest]
    fn test_switching_group_clears_foreign_board(mut ready: Navigator) {
        ready.create_group("ops").unwrap();
        ready.enter_group("ops").unwrap();
        assert!(ready.active_board().is_none());
        assert!(ready.create_task("business", "t", Vec::new()).is_err());
        assert!(ready.tasks().is_empty());
    }

    #[rstest]
    fn test_reentering_same_group_keeps_board(mut ready: Navigator) {
        ready.enter_group("dev").unwrap();
        assert_eq!(ready.active_board().unwrap().name, "sprint");
    }

    #[rstest]
    fn test_create_code_task(mut ready: Navigator) {
        let task = ready
            .create_task("code", "parser", extra(&["https://git.example/p"]))
            .unwrap();
        assert_eq!(task.assignee(), "alice");
        assert_eq!(task.assigned_to(), "sprint");
        assert_eq!(task.date(), DEFAULT_TASK_DATE);
        let info = task.display_info();
        assert!(info.contains("https://git.example/p"));
        assert!(info.contains("Wait"));
    }

    #[rstest]
    fn test_unrecognised_kind_is_reported(mut ready: Navigator) {
        assert_eq!(
            ready.create_task("design", "x", Vec::new()).unwrap_err(),
            WorkspaceError::UnrecognizedKind("design".to_string())
        );
        assert!(ready.tasks().is_empty());
    }

    #[rstest]
    fn test_shape_mismatch_creates_nothing(mut ready: Navigator) {
        assert!(matches!(
            ready.create_task("social", "x", Vec::new()),
            Err(WorkspaceError::ShapeMismatch { expected: 1, found: 0, .. })
        ));
        assert!(ready.tasks().is_empty());
    }

    #[test]
    fn test_create_task_before_board_fails() {
        let mut nav = Navigator::default();
        nav.create_user("alice").unwrap();
        nav.create_group("dev").unwrap();
        nav.enter_group("dev").unwrap();
        assert_eq!(
            nav.create_task("social", "t2", extra(&["http://x"])).unwrap_err(),
            WorkspaceError::PreconditionNotMet(Requirement::UserGroupAndBoard)
        );
        assert!(nav.tasks().is_empty());
    }

    #[rstest]
    fn test_tasks_in_board_filters_by_board_name(mut ready: Navigator) {
        ready.create_task("business", "t1", Vec::new()).unwrap();
        ready.create_board("other").unwrap();
        ready.create_task("business", "t2", Vec::new()).unwrap();
        ready.enter_board("sprint").unwrap();
        ready.create_task("code", "t3", extra(&["r"])).unwrap();

        assert_eq!(task_names(ready.list_tasks_in_board().unwrap()), ["t1", "t3"]);
        ready.enter_board("other").unwrap();
        assert_eq!(task_names(ready.list_tasks_in_board().unwrap()), ["t2"]);
        assert_eq!(task_names(ready.list_tasks().unwrap()), ["t1", "t2", "t3"]);
    }

    #[rstest]
    fn test_list_tasks_is_not_scoped_to_user(mut ready: Navigator) {
        ready.create_task("business", "t1", Vec::new()).unwrap();
        ready.create_user("bob").unwrap();
        assert_eq!(ready.list_tasks().unwrap().len(), 1);
        assert!(ready.list_groups().unwrap().is_empty());
    }

    #[test]
    fn test_listings_require_user() {
        let nav = Navigator::default();
        let expected = WorkspaceError::PreconditionNotMet(Requirement::User);
        assert_eq!(nav.list_groups().unwrap_err(), expected);
        assert_eq!(nav.list_boards().unwrap_err(), expected);
        assert_eq!(nav.list_tasks().unwrap_err(), expected);
        assert_eq!(
            nav.list_tasks_in_board().unwrap_err(),
            WorkspaceError::PreconditionNotMet(Requirement::UserAndBoard)
        );
        assert_eq!(
            nav.list_boards_in_group().unwrap_err(),
            WorkspaceError::PreconditionNotMet(Requirement::UserAndGroup)
        );
    }

    #[rstest]
    fn test_login_previous_user(mut ready: Navigator) {
        ready.create_user("bob").unwrap();
        assert_eq!(ready.active_user().unwrap().name, "bob");
        assert_eq!(ready.login_user("alice").unwrap().name, "alice");
        assert_eq!(ready.list_groups().unwrap()[0].name, "dev");
    }

    #[rstest]
    fn test_login_unknown_user_keeps_active(mut ready: Navigator) {
        assert_eq!(
            ready.login_user("carol").unwrap_err(),
            WorkspaceError::not_found(Entity::User, "carol")
        );
        assert_eq!(ready.active_user().unwrap().name, "alice");
    }

    #[rstest]
    fn test_create_user_keeps_selection(mut ready: Navigator) {
        ready.create_user("bob").unwrap();
        assert_eq!(ready.active_group().unwrap().name, "dev");
        assert_eq!(ready.active_board().unwrap().name, "sprint");
        let task = ready.create_task("business", "t", Vec::new()).unwrap();
        assert_eq!(task.assignee(), "bob");
    }

    #[rstest]
    fn test_recreating_user_resets_it(mut ready: Navigator) {
        ready.create_user("alice").unwrap();
        assert_eq!(ready.users().len(), 1);
        assert!(ready.list_groups().unwrap().is_empty());
    }

    #[test]
    fn test_empty_names_rejected() {
        let mut nav = Navigator::default();
        assert_eq!(
            nav.create_user(" ").unwrap_err(),
            WorkspaceError::EmptyName(Entity::User)
        );
        assert!(nav.create_group("").is_err());
        assert!(nav.groups().is_empty());
    }

    #[rstest]
    fn test_set_task_state(mut ready: Navigator) {
        ready.create_task("code", "t1", extra(&["r"])).unwrap();
        let task = ready.set_task_state("t1", TaskState::Done).unwrap();
        assert_eq!(task.state(), TaskState::Done);
        assert!(ready.tasks()[0].display_info().ends_with("State: Done"));
        assert_eq!(
            ready.set_task_state("t9", TaskState::Todo).unwrap_err(),
            WorkspaceError::not_found(Entity::Task, "t9")
        );
    }

    #[test]
    fn test_set_task_state_requires_user_and_board() {
        let mut nav = Navigator::default();
        let expected = WorkspaceError::PreconditionNotMet(Requirement::UserAndBoard);
        assert_eq!(nav.set_task_state("t1", TaskState::Done).unwrap_err(), expected);

        nav.create_user("alice").unwrap();
        nav.create_group("dev").unwrap();
        nav.enter_group("dev").unwrap();
        assert_eq!(nav.set_task_state("t1", TaskState::Done).unwrap_err(), expected);
    }

    #[test]
    fn test_custom_task_date() {
        let mut nav = Navigator::new("2024-05-06");
        nav.create_user("alice").unwrap();
        nav.create_group("dev").unwrap();
        nav.enter_group("dev").unwrap();
        nav.create_board("b").unwrap();
        let task = nav.create_task("business", "t", Vec::new()).unwrap();
        assert_eq!(task.date(), "2024-05-06");
    }

    #[rstest]
    fn test_snapshot(mut ready: Navigator) {
        ready.create_task("social", "t1", extra(&["fig"])).unwrap();
        let json = serde_json::to_value(ready.snapshot()).unwrap();
        assert_eq!(json["active_user"], "alice");
        assert_eq!(json["active_group"], "dev");
        assert_eq!(json["active_board"], "sprint");
        assert_eq!(json["groups"][0]["boards"][0]["name"], "sprint");
        assert_eq!(json["tasks"][0]["design_link"], "fig");
        assert_eq!(
            ready.tasks()[0].kind(),
            &TaskKind::Social {
                design_link: "fig".to_string()
            }
        );
    }
}
