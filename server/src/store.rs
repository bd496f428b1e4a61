//! Persistence seam for todo records.
//!
//! The service only talks to `dyn TodoStore`. `MemoryStore` keeps records in
//! insertion order behind a tokio `RwLock`, which also serializes conflicting
//! writes to the same record. [`PgStore`] persists them in Postgres.

pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{CreateTodo, Todo, UpdateTodo};

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or failed internally.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write, e.g. a constraint violation.
    #[error("{0}")]
    Rejected(String),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Persist a new record, assigning `id` and `created_at`.
    async fn insert(&self, input: CreateTodo) -> Result<Todo, StoreError>;

    /// Merge `changes` into the record and return it, or `None` if no record has `id`.
    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Option<Todo>, StoreError>;

    /// Remove the record and return it, or `None` if it did not exist.
    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;
}

pub type SharedStore = Arc<dyn TodoStore>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn insert(&self, input: CreateTodo) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        // Keep created_at non-decreasing even if the wall clock steps back.
        let now = Utc::now();
        let created_at = match todos.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };
        let todo = Todo {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description.unwrap_or_default(),
            completed: input.completed.unwrap_or(false),
            created_at,
        };
        todos.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(todos.iter_mut().find(|todo| todo.id == id).map(|todo| {
            changes.apply(todo);
            todo.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter()
            .position(|todo| todo.id == id)
            .map(|index| todos.remove(index)))
    }
}
