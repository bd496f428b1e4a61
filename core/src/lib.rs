//! Client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps a local mirror of
//! the server's todo list in sync with confirmed responses.
//!
//! # Design
//! - `TodoClient` is stateless and holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. `TodoApp` drives both halves through a
//!   host-supplied `Transport`.
//! - `TodoState` is plain data updated only by append/replace/remove with
//!   server-confirmed records, so it can be tested without any UI.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use app::TodoApp;
pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use state::{Draft, EditBuffer, EditSession, TodoState};
pub use types::{CreateTodo, Message, Todo, ToggleTodo, UpdateTodo};
