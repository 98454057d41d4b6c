#[cfg(test)]
mod tests {
    use reqwest::{Client, Method, StatusCode};
    use serde_json::{json, Value};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use test_context::{test_context, AsyncTestContext};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;
    use tudu::db::tasks::Tasks;
    use tudu::server::{self, AppState};

    struct ServerTestContext {
        base_url: String,
        client: Client,
        shutdown: oneshot::Sender<()>,
        handle: JoinHandle<anyhow::Result<()>>,
    }

    impl AsyncTestContext for ServerTestContext {
        async fn setup() -> Self {
            let tasks = Tasks::open(":memory:", false).unwrap();
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();

            let (shutdown, signal) = oneshot::channel::<()>();
            let handle = tokio::spawn(server::run(listener, AppState::new(tasks), async move {
                let _ = signal.await;
            }));

            ServerTestContext {
                base_url: format!("http://{}", addr),
                client: Client::new(),
                shutdown,
                handle,
            }
        }

        async fn teardown(self) {
            // Idle keep-alive connections would otherwise delay the shutdown.
            drop(self.client);
            let _ = self.shutdown.send(());
            let _ = self.handle.await;
        }
    }

    impl ServerTestContext {
        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        async fn create(&self, body: Value) -> Value {
            let response = self.client.post(self.url("/api/tasks")).json(&body).send().await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            response.json().await.unwrap()
        }

        async fn list(&self, query: &str) -> Vec<Value> {
            let response = self.client.get(self.url(&format!("/api/tasks{}", query))).send().await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            response.json().await.unwrap()
        }

        async fn send(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
            let mut request = self.client.request(method, self.url(path));
            if let Some(body) = body {
                request = request.json(&body);
            }
            let response = request.send().await.unwrap();
            let status = response.status();
            (status, response.json().await.unwrap())
        }
    }

    fn titles(tasks: &[Value]) -> Vec<&str> {
        tasks.iter().map(|t| t["title"].as_str().unwrap()).collect()
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_create_with_defaults(ctx: &mut ServerTestContext) {
        let task = ctx.create(json!({ "title": "Minimal Task" })).await;

        assert!(task["id"].as_i64().unwrap() > 0);
        assert_eq!(task["title"], "Minimal Task");
        assert_eq!(task["priority"], "medium");
        assert_eq!(task["completed"], json!(0));
        assert_eq!(task["description"], Value::Null);
        assert_eq!(task["due_date"], Value::Null);
        assert_eq!(task["created_at"], task["updated_at"]);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_create_full_task(ctx: &mut ServerTestContext) {
        let task = ctx
            .create(json!({
                "title": "  Write report  ",
                "description": "Quarterly numbers",
                "due_date": "2025-11-10",
                "priority": "high"
            }))
            .await;

        assert_eq!(task["title"], "Write report");
        assert_eq!(task["description"], "Quarterly numbers");
        assert_eq!(task["due_date"], "2025-11-10");
        assert_eq!(task["priority"], "high");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_create_validation(ctx: &mut ServerTestContext) {
        let (status, body) = ctx.send(Method::POST, "/api/tasks", Some(json!({ "title": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Task title is required");

        let (status, body) = ctx.send(Method::POST, "/api/tasks", Some(json!({ "description": "no title" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Task title is required");

        let (status, body) = ctx
            .send(Method::POST, "/api/tasks", Some(json!({ "title": "Task", "priority": "urgent" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Priority must be high, medium, or low");

        let (status, body) = ctx
            .send(Method::POST, "/api/tasks", Some(json!({ "title": "Task", "due_date": "11/10/2025" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Due date must be a valid date in YYYY-MM-DD format");

        // Nothing was stored.
        assert!(ctx.list("").await.is_empty());
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_malformed_body(ctx: &mut ServerTestContext) {
        let response = ctx
            .client
            .post(ctx.url("/api/tasks"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid request body");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_list_order(ctx: &mut ServerTestContext) {
        ctx.create(json!({ "title": "Later", "due_date": "2025-11-10" })).await;
        ctx.create(json!({ "title": "Undated" })).await;
        ctx.create(json!({ "title": "Sooner", "due_date": "2025-11-05" })).await;
        let done = ctx.create(json!({ "title": "Done", "due_date": "2025-11-01" })).await;
        ctx.send(Method::PATCH, &format!("/api/tasks/{}/complete", done["id"]), None).await;

        let tasks = ctx.list("").await;
        assert_eq!(titles(&tasks), vec!["Sooner", "Later", "Undated", "Done"]);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_list_filters(ctx: &mut ServerTestContext) {
        ctx.create(json!({ "title": "Write docs", "description": "TODO app guide", "priority": "high" })).await;
        ctx.create(json!({ "title": "Review PRs", "priority": "low" })).await;
        let done = ctx.create(json!({ "title": "Ship it", "priority": "high" })).await;
        ctx.send(Method::PATCH, &format!("/api/tasks/{}/complete", done["id"]), None).await;

        assert_eq!(ctx.list("?status=active").await.len(), 2);
        assert_eq!(titles(&ctx.list("?status=completed").await), vec!["Ship it"]);
        assert_eq!(ctx.list("?priority=high").await.len(), 2);
        assert_eq!(titles(&ctx.list("?search=guide").await), vec!["Write docs"]);
        assert_eq!(titles(&ctx.list("?status=active&priority=high&search=DOCS").await), vec!["Write docs"]);

        // Unknown filter values are ignored.
        assert_eq!(ctx.list("?status=archived").await.len(), 3);
        assert_eq!(ctx.list("?priority=urgent").await.len(), 3);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_update_task(ctx: &mut ServerTestContext) {
        let task = ctx
            .create(json!({ "title": "Original", "description": "Keep", "due_date": "2025-11-05", "priority": "low" }))
            .await;
        let path = format!("/api/tasks/{}", task["id"]);

        let (status, updated) = ctx.send(Method::PUT, &path, Some(json!({ "title": "Renamed" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Renamed");
        assert_eq!(updated["description"], "Keep");
        assert_eq!(updated["due_date"], "2025-11-05");
        assert_eq!(updated["priority"], "low");
        assert_eq!(updated["created_at"], task["created_at"]);

        let (status, cleared) = ctx
            .send(Method::PUT, &path, Some(json!({ "description": null, "due_date": null, "completed": "yes" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["description"], Value::Null);
        assert_eq!(cleared["due_date"], Value::Null);
        assert_eq!(cleared["completed"], json!(1));

        let (_, reopened) = ctx.send(Method::PUT, &path, Some(json!({ "completed": "false" }))).await;
        assert_eq!(reopened["completed"], json!(0));
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_update_validation(ctx: &mut ServerTestContext) {
        let task = ctx.create(json!({ "title": "Task" })).await;
        let path = format!("/api/tasks/{}", task["id"]);

        let (status, body) = ctx.send(Method::PUT, &path, Some(json!({ "title": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Task title cannot be empty");

        let (status, body) = ctx.send(Method::PUT, &path, Some(json!({ "priority": "urgent" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Priority must be high, medium, or low");

        let (status, body) = ctx.send(Method::PUT, &path, Some(json!({ "due_date": "2025-13-01" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Due date must be a valid date in YYYY-MM-DD format");

        let (status, body) = ctx.send(Method::PUT, "/api/tasks/99999", Some(json!({ "title": "Ghost" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_update_missing_task_ignores_body(ctx: &mut ServerTestContext) {
        let (status, body) = ctx.send(Method::PUT, "/api/tasks/99999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");

        let (status, body) = ctx.send(Method::PUT, "/api/tasks/99999", Some(json!({ "title": 5 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");

        // An existing task still gets the body checked.
        let task = ctx.create(json!({ "title": "Task" })).await;
        let (status, body) = ctx.send(Method::PUT, &format!("/api/tasks/{}", task["id"]), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_update_rejects_null_title_and_priority(ctx: &mut ServerTestContext) {
        let task = ctx.create(json!({ "title": "Keep me", "priority": "high" })).await;
        let path = format!("/api/tasks/{}", task["id"]);

        let (status, body) = ctx.send(Method::PUT, &path, Some(json!({ "title": null }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Task title cannot be empty");

        let (status, body) = ctx.send(Method::PUT, &path, Some(json!({ "priority": null }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Priority must be high, medium, or low");

        let stored = ctx.list("").await;
        assert_eq!(stored[0]["title"], "Keep me");
        assert_eq!(stored[0]["priority"], "high");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_create_loose_inputs(ctx: &mut ServerTestContext) {
        let (status, body) = ctx.send(Method::POST, "/api/tasks", Some(json!({ "title": 123 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Task title is required");

        let task = ctx.create(json!({ "title": "Default priority", "priority": "" })).await;
        assert_eq!(task["priority"], "medium");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_invalid_ids(ctx: &mut ServerTestContext) {
        for path in ["/api/tasks/abc", "/api/tasks/0", "/api/tasks/-1"] {
            let (status, body) = ctx.send(Method::DELETE, path, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Valid task ID is required");
        }

        let (status, body) = ctx.send(Method::PATCH, "/api/tasks/abc/complete", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Valid task ID is required");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_toggle_complete(ctx: &mut ServerTestContext) {
        let task = ctx.create(json!({ "title": "Flip me" })).await;
        let path = format!("/api/tasks/{}/complete", task["id"]);

        let (status, once) = ctx.send(Method::PATCH, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(once["completed"], json!(1));

        let (_, twice) = ctx.send(Method::PATCH, &path, None).await;
        assert_eq!(twice["completed"], json!(0));

        let (status, body) = ctx.send(Method::PATCH, "/api/tasks/99999/complete", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_delete_task(ctx: &mut ServerTestContext) {
        let task = ctx.create(json!({ "title": "Temporary" })).await;
        let path = format!("/api/tasks/{}", task["id"]);

        let (status, body) = ctx.send(Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Task deleted successfully");
        assert_eq!(body["id"], task["id"]);

        let (status, body) = ctx.send(Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");

        assert!(ctx.list("").await.is_empty());
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_unknown_route(ctx: &mut ServerTestContext) {
        let (status, body) = ctx.send(Method::GET, "/api/nothing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_cors_headers(ctx: &mut ServerTestContext) {
        let preflight = ctx.client.request(Method::OPTIONS, ctx.url("/api/tasks/1")).send().await.unwrap();
        assert_eq!(preflight.status(), StatusCode::NO_CONTENT);
        assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
        assert!(preflight.headers()["access-control-allow-methods"].to_str().unwrap().contains("PATCH"));

        let response = ctx.client.get(ctx.url("/api/tasks")).send().await.unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_store_failure_returns_generic_message() {
        let temp_dir = tempfile::tempdir().unwrap();
        let location = temp_dir.path().join("tudu.db");
        let location = location.to_str().unwrap();

        let tasks = Tasks::open(location, false).unwrap();
        rusqlite::Connection::open(location)
            .unwrap()
            .execute("DROP TABLE tasks", [])
            .unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(server::run(listener, AppState::new(tasks), async move {
            let _ = signal.await;
        }));

        let client = Client::new();
        let response = client.get(format!("{}/api/tasks", base_url)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Failed to fetch tasks" }));

        drop(client);
        let _ = shutdown.send(());
        let _ = handle.await;
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_preflight_requests_are_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let tasks = Tasks::open(":memory:", false).unwrap();
        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(server::run(listener, AppState::new(tasks), async move {
            let _ = signal.await;
        }));

        let client = Client::new();
        let response = client
            .request(Method::OPTIONS, format!("{}/api/tasks", base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        drop(client);
        let _ = shutdown.send(());
        let _ = handle.await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let line = output.lines().find(|line| line.contains("request completed")).unwrap();
        assert!(line.contains("method=OPTIONS"));
        assert!(line.contains("status=204"));
    }
}
