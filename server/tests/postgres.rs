//! `PgStore` against a real database.
//!
//! Set `TEST_DATABASE_URL` to a scratch Postgres database to run these; they
//! skip otherwise. Each test only touches the records it created.

use todo_server::{CreateTodo, PgStore, TodoStore, UpdateTodo};
use uuid::Uuid;

async fn make_store() -> Option<PgStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    PgStore::connect(&url, 2).await.ok()
}

fn create(title: &str) -> CreateTodo {
    CreateTodo {
        title: title.to_string(),
        description: None,
        completed: None,
    }
}

#[tokio::test]
async fn pg_store_lifecycle() {
    let store = match make_store().await {
        Some(s) => s,
        None => {
            eprintln!("Skipping pg_store_lifecycle: DB unavailable");
            return;
        }
    };

    let first = store.insert(create("first")).await.unwrap();
    let second = store
        .insert(CreateTodo {
            title: "second".to_string(),
            description: Some("with notes".to_string()),
            completed: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(first.description, "");
    assert!(!first.completed);
    assert!(second.completed);
    assert!(second.created_at >= first.created_at);

    let ids: Vec<Uuid> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .filter(|id| *id == first.id || *id == second.id)
        .collect();
    assert_eq!(ids, [first.id, second.id]);

    let changes = UpdateTodo {
        completed: Some(true),
        ..UpdateTodo::default()
    };
    let updated = store.update(first.id, changes).await.unwrap().unwrap();
    assert_eq!(updated.title, "first");
    assert!(updated.completed);
    assert_eq!(updated.created_at, first.created_at);

    assert!(store
        .update(Uuid::new_v4(), UpdateTodo::default())
        .await
        .unwrap()
        .is_none());

    for todo in [&first, &second] {
        assert_eq!(store.delete(todo.id).await.unwrap().map(|t| t.id), Some(todo.id));
        assert!(store.delete(todo.id).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn pg_store_survives_reconnect() {
    let store = match make_store().await {
        Some(s) => s,
        None => {
            eprintln!("Skipping pg_store_survives_reconnect: DB unavailable");
            return;
        }
    };
    let todo = store.insert(create("durable")).await.unwrap();
    drop(store);

    let Some(reopened) = make_store().await else {
        panic!("database went away between connections");
    };
    let listed = reopened.list().await.unwrap();
    assert!(listed.iter().any(|t| t == &todo));
    reopened.delete(todo.id).await.unwrap();
}
