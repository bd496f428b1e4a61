//! Local mirror of the server's todo collection.
//!
//! `TodoState` is plain data. The reconciliation methods (`append`,
//! `replace`, `remove`) are the only ways the list changes, and each takes a
//! record the server has already confirmed.

use uuid::Uuid;

use crate::types::{Todo, UpdateTodo};

/// Input fields for a todo that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

/// Staged field values for the todo in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl From<&Todo> for EditBuffer {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
        }
    }
}

impl From<&EditBuffer> for UpdateTodo {
    fn from(buffer: &EditBuffer) -> Self {
        UpdateTodo {
            title: Some(buffer.title.clone()),
            description: Some(buffer.description.clone()),
            completed: Some(buffer.completed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: Uuid,
    pub buffer: EditBuffer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub draft: Draft,
    /// At most one todo is edited at a time.
    pub editing: Option<EditSession>,
    pub loading: bool,
    /// Last failure only; a new failure overwrites it.
    pub error: Option<String>,
}

impl Default for TodoState {
    // Loading until the first list fetch settles.
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            draft: Draft::default(),
            editing: None,
            loading: true,
            error: None,
        }
    }
}

impl TodoState {
    pub fn find(&self, id: Uuid) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn is_editing(&self, id: Uuid) -> bool {
        self.editing.as_ref().is_some_and(|session| session.id == id)
    }

    /// Add a newly created todo at the end. The list is never re-sorted.
    pub fn append(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Swap in the server's copy of a todo, keeping its position.
    /// Returns `false` if no local entry has that id.
    pub fn replace(&mut self, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|existing| existing.id == todo.id) {
            Some(existing) => {
                *existing = todo;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        self.todos.len() != before
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn todo(n: u128, title: &str) -> Todo {
        Todo {
            id: Uuid::from_u128(n),
            title: title.to_string(),
            description: String::new(),
            completed: false,
            created_at: DateTime::from_timestamp(n as i64, 0).unwrap(),
        }
    }

    fn state_with(todos: Vec<Todo>) -> TodoState {
        TodoState {
            todos,
            ..TodoState::default()
        }
    }

    #[test]
    fn default_starts_loading() {
        let state = TodoState::default();
        assert!(state.loading);
        assert!(state.todos.is_empty());
        assert!(state.editing.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn append_goes_to_the_end() {
        let mut state = state_with(vec![todo(2, "b")]);
        state.append(todo(1, "a"));
        let ids: Vec<_> = state.todos.iter().map(|t| t.id.as_u128()).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut state = state_with(vec![todo(1, "a"), todo(2, "b"), todo(3, "c")]);
        let mut changed = todo(2, "B");
        changed.completed = true;

        assert!(state.replace(changed.clone()));
        assert_eq!(state.todos[1], changed);
        assert_eq!(state.todos.len(), 3);
    }

    #[test]
    fn replace_unknown_id_is_a_no_op() {
        let mut state = state_with(vec![todo(1, "a")]);
        assert!(!state.replace(todo(9, "ghost")));
        assert_eq!(state.todos, vec![todo(1, "a")]);
    }

    #[test]
    fn remove_by_id() {
        let mut state = state_with(vec![todo(1, "a"), todo(2, "b")]);
        assert!(state.remove(Uuid::from_u128(1)));
        assert!(!state.remove(Uuid::from_u128(1)));
        assert_eq!(state.todos, vec![todo(2, "b")]);
    }

    #[test]
    fn edit_buffer_round_trips_into_full_update() {
        let mut source = todo(1, "a");
        source.description = "desc".to_string();
        source.completed = true;

        let buffer = EditBuffer::from(&source);
        let update = UpdateTodo::from(&buffer);
        assert_eq!(update.title.as_deref(), Some("a"));
        assert_eq!(update.description.as_deref(), Some("desc"));
        assert_eq!(update.completed, Some(true));
    }
}
