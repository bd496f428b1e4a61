//! Terminal front-end for the todo service.
//!
//! Every command loads the list once, applies one action through
//! `TodoApp`, then prints the resulting list. Failures print the same fixed
//! message the state carries and exit non-zero; the underlying error is only
//! logged.

mod transport;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use todo_core::{ApiError, Todo, TodoApp, TodoClient, Transport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the todo server
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all todos
    List,
    /// Create a todo
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change any of a todo's fields
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip a todo between pending and completed
    Toggle { id: Uuid },
    /// Remove a todo
    Delete { id: Uuid },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("todo_cli=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let todos = run(cli, UreqTransport::new())?;
    print_todos(&todos);
    Ok(())
}

/// Load, apply the command, and return the list to print.
fn run<T: Transport>(cli: Cli, transport: T) -> anyhow::Result<Vec<Todo>> {
    let mut app = TodoApp::new(TodoClient::new(&cli.api_url), transport);

    let loaded = app.load();
    settle(&app, loaded)?;

    let result = match cli.command {
        Command::List => Ok(()),
        Command::Add { title, description } => {
            let draft = app.draft_mut();
            draft.title = title;
            draft.description = description;
            app.add().map(|_| ())
        }
        Command::Edit {
            id,
            title,
            description,
            completed,
        } => edit(&mut app, id, title, description, completed),
        Command::Toggle { id } => app.toggle(id).map(|_| ()),
        Command::Delete { id } => app.delete(id),
    };
    settle(&app, result)?;

    Ok(app.state().todos.clone())
}

fn edit<T: Transport>(
    app: &mut TodoApp<T>,
    id: Uuid,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
) -> Result<(), ApiError> {
    app.start_editing(id)?;
    if let Some(buffer) = app.edit_buffer_mut() {
        if let Some(title) = title {
            buffer.title = title;
        }
        if let Some(description) = description {
            buffer.description = description;
        }
        if let Some(completed) = completed {
            buffer.completed = completed;
        }
    }
    app.save_edit().map(|_| ())
}

/// Turn an operation result into the message a user should see.
fn settle<T: Transport, R>(app: &TodoApp<T>, result: Result<R, ApiError>) -> anyhow::Result<R> {
    result.map_err(|err| match &app.state().error {
        Some(message) => anyhow!("{message}"),
        None => anyhow!("{err}"),
    })
}

fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("No todos.");
        return;
    }
    for todo in todos {
        let mark = if todo.completed { "x" } else { " " };
        println!("[{mark}] {}  ({})", todo.title, todo.id);
        if !todo.description.is_empty() {
            println!("      {}", todo.description);
        }
    }
}
