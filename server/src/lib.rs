//! HTTP service for the todo resource.
//!
//! # Overview
//! Exposes list, create, replace, partial-update and delete under
//! `/api/todos`. Handlers are stateless; all state lives behind the
//! [`TodoStore`] trait object carried in [`AppState`].
//!
//! # Design
//! - Every failure leaves a route as a status plus a `{"message"}` body,
//!   including axum's own JSON and path rejections.
//! - Missing ids on `PUT`/`PATCH` answer `404` by default; see
//!   [`NotFoundMode`] for the legacy `200 null` behaviour.
//! - `DELETE` confirms even when nothing was removed.
//! - Records go to Postgres when a database URL is configured, otherwise to
//!   an in-memory store that is lost on restart.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::{NotFoundMode, ServerConfig};
pub use error::ServiceError;
pub use model::{CreateTodo, Message, Todo, ToggleTodo, UpdateTodo};
pub use store::{MemoryStore, PgStore, SharedStore, StoreError, TodoStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub not_found: NotFoundMode,
}

/// Router over a fresh in-memory store with default settings.
pub fn app() -> Router {
    app_with(MemoryStore::shared(), &ServerConfig::default())
}

pub fn app_with(store: SharedStore, config: &ServerConfig) -> Router {
    let state = AppState {
        store,
        not_found: config.not_found,
    };
    Router::new()
        .route("/api/todos", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/api/todos/{id}",
            put(routes::replace_todo)
                .patch(routes::toggle_todo)
                .delete(routes::delete_todo),
        )
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    match &config.cors_origin {
        Some(origin) => CorsLayer::permissive().allow_origin(origin.clone()),
        None => CorsLayer::permissive(),
    }
}

/// Pick the store named by the configuration: Postgres when a database URL
/// is set, memory otherwise.
pub async fn connect_store(config: &ServerConfig) -> Result<SharedStore, StoreError> {
    match config.database_url.as_deref() {
        Some(url) => {
            let store = PgStore::connect(url, config.max_connections).await?;
            tracing::info!(max_connections = config.max_connections, "using postgres store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("no database url configured, todos will not survive a restart");
            Ok(MemoryStore::shared())
        }
    }
}

/// Serve over a fresh in-memory store.
pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(MemoryStore::shared(), &config)).await
}

/// Serve `store` until `shutdown` resolves.
pub async fn run_until<F>(
    listener: TcpListener,
    store: SharedStore,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app_with(store, &config))
        .with_graceful_shutdown(shutdown)
        .await
}
