//! Wire types for the `/api/todos` resource.
//!
//! `Todo` is both the stored record and the response body. The request
//! payloads keep every optional field as `Option` so an explicit `null` in the
//! JSON behaves the same as an absent key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/todos`.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PUT /api/todos/{id}`, and the merge set handed to the store.
///
/// Only the fields present are applied. `id` and `createdAt` are not
/// represented, so a client cannot overwrite them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PATCH /api/todos/{id}`.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ToggleTodo {
    pub completed: bool,
}

impl From<ToggleTodo> for UpdateTodo {
    fn from(toggle: ToggleTodo) -> Self {
        UpdateTodo {
            completed: Some(toggle.completed),
            ..UpdateTodo::default()
        }
    }
}

impl UpdateTodo {
    pub(crate) fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

/// Confirmation body returned by `DELETE`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
