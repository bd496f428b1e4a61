//! Client application driver.
//!
//! # Design
//! `TodoApp` owns a [`TodoState`] and a [`Transport`]. Every user action that
//! needs the server goes through `round_trip`, which sets `loading` for the
//! duration of the call and, on failure, records a fixed per-operation
//! message. The list itself only changes after the server confirms, so a
//! failed call never needs a rollback.
//!
//! The underlying `ApiError` is returned to the caller and logged, but never
//! copied into `state.error`.

use uuid::Uuid;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::state::{Draft, EditBuffer, EditSession, TodoState};
use crate::types::{CreateTodo, Todo, UpdateTodo};

pub const LOAD_FAILED: &str = "Failed to load todos";
pub const ADD_FAILED: &str = "Failed to add todo";
pub const UPDATE_FAILED: &str = "Failed to update todo";
pub const DELETE_FAILED: &str = "Failed to delete todo";
pub const TOGGLE_FAILED: &str = "Failed to update status";

pub struct TodoApp<T> {
    client: TodoClient,
    transport: T,
    state: TodoState,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: TodoState::default(),
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.state.draft
    }

    /// Staging buffer of the todo in edit mode, if any.
    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.state.editing.as_mut().map(|session| &mut session.buffer)
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    fn round_trip<R>(
        &mut self,
        failure: &'static str,
        call: impl FnOnce(&TodoClient, &T) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        self.state.loading = true;
        let result = call(&self.client, &self.transport);
        self.state.loading = false;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "{failure}");
            self.state.error = Some(failure.to_string());
        }
        result
    }

    /// Fetch the full list and replace the local mirror with it.
    pub fn load(&mut self) -> Result<(), ApiError> {
        let todos = self.round_trip(LOAD_FAILED, |client, transport| {
            let response = transport.execute(client.build_list_todos())?;
            client.parse_list_todos(response)
        })?;
        tracing::debug!(count = todos.len(), "loaded todos");
        self.state.todos = todos;
        Ok(())
    }

    /// Submit the draft. A blank title is rejected without a request.
    pub fn add(&mut self) -> Result<Todo, ApiError> {
        if self.state.draft.title.trim().is_empty() {
            return Err(ApiError::EmptyTitle);
        }
        let input = CreateTodo {
            title: self.state.draft.title.clone(),
            description: self.state.draft.description.clone(),
            completed: false,
        };
        let todo = self.round_trip(ADD_FAILED, |client, transport| {
            let request = client.build_create_todo(&input)?;
            client.parse_create_todo(transport.execute(request)?)
        })?;
        tracing::info!(id = %todo.id, "added todo");
        self.state.append(todo.clone());
        self.state.draft = Draft::default();
        Ok(todo)
    }

    pub fn start_editing(&mut self, id: Uuid) -> Result<(), ApiError> {
        let todo = self.state.find(id).ok_or(ApiError::NotFound)?;
        self.state.editing = Some(EditSession {
            id,
            buffer: EditBuffer::from(todo),
        });
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.state.editing = None;
    }

    /// Send the edit buffer as a replace. Edit mode is left only on success.
    ///
    /// A blank title fails like a rejected request, but sends nothing.
    pub fn save_edit(&mut self) -> Result<Todo, ApiError> {
        let session = self.state.editing.as_ref().ok_or(ApiError::NotEditing)?;
        if session.buffer.title.trim().is_empty() {
            let err = ApiError::EmptyTitle;
            tracing::warn!(error = %err, "{UPDATE_FAILED}");
            self.state.error = Some(UPDATE_FAILED.to_string());
            return Err(err);
        }
        let id = session.id;
        let update = UpdateTodo::from(&session.buffer);

        let todo = self.round_trip(UPDATE_FAILED, |client, transport| {
            let request = client.build_replace_todo(id, &update)?;
            client.parse_replace_todo(transport.execute(request)?)
        })?;
        if !self.state.replace(todo.clone()) {
            tracing::debug!(%id, "saved todo is not in the local list");
        }
        self.state.editing = None;
        Ok(todo)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), ApiError> {
        self.round_trip(DELETE_FAILED, |client, transport| {
            client.parse_delete_todo(transport.execute(client.build_delete_todo(id))?)
        })?;
        self.state.remove(id);
        if self.state.is_editing(id) {
            self.state.editing = None;
        }
        tracing::info!(%id, "deleted todo");
        Ok(())
    }

    /// Flip `completed` relative to the locally known value.
    pub fn toggle(&mut self, id: Uuid) -> Result<Todo, ApiError> {
        let current = self.state.find(id).ok_or(ApiError::NotFound)?.completed;
        let todo = self.round_trip(TOGGLE_FAILED, |client, transport| {
            let request = client.build_toggle_todo(id, !current)?;
            client.parse_toggle_todo(transport.execute(request)?)
        })?;
        self.state.replace(todo.clone());
        Ok(todo)
    }
}
