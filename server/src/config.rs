use axum::http::{HeaderValue, Uri};
use clap::{Parser, ValueEnum};

/// How `PUT` and `PATCH` answer when the id does not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NotFoundMode {
    /// `404` with `{"message": "Todo not found"}`.
    #[default]
    Status,
    /// `200` with a `null` body, for clients written against the legacy API.
    Null,
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about = "HTTP service for the todo resource", long_about = None)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "TODO_NOT_FOUND", value_enum, default_value_t = NotFoundMode::Status)]
    pub not_found: NotFoundMode,

    /// Allowed browser origin, e.g. `http://localhost:3000`. Any origin is
    /// allowed when unset.
    #[arg(long, env = "CORS_ORIGIN", value_parser = parse_origin)]
    pub cors_origin: Option<HeaderValue>,

    /// Postgres connection string. Records are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            not_found: NotFoundMode::default(),
            cors_origin: None,
            database_url: None,
            max_connections: 5,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accepts only `http(s)://host[:port]`, the shape browsers send in `Origin`.
fn parse_origin(raw: &str) -> Result<HeaderValue, String> {
    let uri: Uri = raw
        .parse()
        .map_err(|err| format!("invalid origin {raw:?}: {err}"))?;
    let web_scheme = matches!(uri.scheme_str(), Some("http" | "https"));
    let bare = uri.authority().is_some() && matches!(uri.path(), "" | "/") && uri.query().is_none();
    if !web_scheme || !bare {
        return Err(format!("origin must look like http://host[:port], got {raw:?}"));
    }
    HeaderValue::from_str(raw.trim_end_matches('/')).map_err(|err| err.to_string())
}
