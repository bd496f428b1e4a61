use todo_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Blocking transport backed by a ureq agent.
///
/// ureq's status-as-error behaviour is disabled so 4xx/5xx responses come
/// back as data and the core client interprets the status.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// The request's own content type, or JSON when it names none.
fn content_type(headers: &[(String, String)]) -> &str {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.as_str())
        .unwrap_or("application/json")
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let body = req.body.unwrap_or_default();
        let content_type = content_type(&req.headers);

        let result = match req.method {
            HttpMethod::Get => self.agent.get(&req.path).call(),
            HttpMethod::Delete => self.agent.delete(&req.path).call(),
            HttpMethod::Post => self
                .agent
                .post(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
            HttpMethod::Put => self
                .agent
                .put(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
            HttpMethod::Patch => self
                .agent
                .patch(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        tracing::debug!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use todo_server::ServerConfig;
    use uuid::Uuid;

    use super::*;

    fn spawn_server() -> String {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                todo_server::run(listener, ServerConfig::default()).await
            })
            .unwrap();
        });

        format!("http://{addr}")
    }

    fn post(path: String, content_type: Option<&str>, body: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path,
            headers: content_type
                .map(|value| vec![("Content-Type".to_string(), value.to_string())])
                .unwrap_or_default(),
            body: Some(body.to_string()),
        }
    }

    #[test]
    fn content_type_lookup_ignores_case_and_defaults_to_json() {
        let headers = vec![("CONTENT-TYPE".to_string(), "text/plain".to_string())];
        assert_eq!(content_type(&headers), "text/plain");
        assert_eq!(content_type(&[]), "application/json");
    }

    #[test]
    fn executes_against_live_server() {
        let base = spawn_server();
        let transport = UreqTransport::new();
        let todos = format!("{base}/api/todos");

        let created = transport
            .execute(post(todos.clone(), Some("application/json"), r#"{"title":"Buy milk"}"#))
            .unwrap();
        assert_eq!(created.status, 201);
        assert!(created.body.contains("Buy milk"));
        assert!(created
            .headers
            .iter()
            .any(|(name, value)| name == "content-type" && value.starts_with("application/json")));

        // No header falls back to JSON.
        let defaulted = transport
            .execute(post(todos.clone(), None, r#"{"title":"Walk dog"}"#))
            .unwrap();
        assert_eq!(defaulted.status, 201);

        // An explicit header is sent as given, so the server refuses the body.
        let plain = transport
            .execute(post(todos.clone(), Some("text/plain"), r#"{"title":"x"}"#))
            .unwrap();
        assert_eq!(plain.status, 400);

        let listed = transport
            .execute(HttpRequest {
                method: HttpMethod::Get,
                path: todos,
                headers: Vec::new(),
                body: None,
            })
            .unwrap();
        assert_eq!(listed.status, 200);
        let titles: Vec<serde_json::Value> = serde_json::from_str(&listed.body).unwrap();
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn error_statuses_come_back_as_data() {
        let base = spawn_server();
        let response = UreqTransport::new()
            .execute(HttpRequest {
                method: HttpMethod::Patch,
                path: format!("{base}/api/todos/{}", Uuid::nil()),
                headers: Vec::new(),
                body: Some(r#"{"completed":true}"#.to_string()),
            })
            .unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body, r#"{"message":"Todo not found"}"#);
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = UreqTransport::new().execute(HttpRequest {
            method: HttpMethod::Get,
            path: format!("http://{addr}/api/todos"),
            headers: Vec::new(),
            body: None,
        });
        assert!(result.is_err());
    }
}
