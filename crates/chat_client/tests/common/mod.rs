//! In-process chat server used by the integration tests. Real HTTP, no mocks.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

type Reply = Arc<dyn Fn(usize) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
pub struct TestServer {
    config: Option<(StatusCode, String)>,
    reply: Reply,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl TestServer {
    /// Answers every question with `answer`, no `config.json` route.
    pub fn answering(answer: &str) -> Self {
        let body = serde_json::json!({"output": {"answer": answer}, "metadata": {}}).to_string();
        Self::replying(move |_| (StatusCode::OK, body.clone()))
    }

    /// Answers the n-th call (0-based) with whatever `reply` returns.
    pub fn replying(reply: impl Fn(usize) -> (StatusCode, String) + Send + Sync + 'static) -> Self {
        Self {
            config: None,
            reply: Arc::new(reply),
            delay: Duration::ZERO,
            calls: Arc::default(),
            bodies: Arc::default(),
        }
    }

    pub fn with_config(mut self, status: StatusCode, body: &str) -> Self {
        self.config = Some((status, body.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn router(&self) -> Router {
        let mut router = Router::new().route("/chat/invoke", post(invoke));
        if self.config.is_some() {
            router = router.route("/config.json", get(config));
        }
        router.with_state(self.clone())
    }

    /// Serve on the current runtime; returns the base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Serve from a background thread with its own runtime (for binary tests).
    pub fn spawn_in_thread(&self) -> String {
        let server = self.clone();
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, server.router()).await.unwrap();
            });
        });
        format!("http://{}", rx.recv().unwrap())
    }
}

async fn invoke(State(server): State<TestServer>, Json(body): Json<Value>) -> (StatusCode, String) {
    let n = server.calls.fetch_add(1, Ordering::SeqCst);
    server.bodies.lock().unwrap().push(body);
    tokio::time::sleep(server.delay).await;
    (server.reply)(n)
}

async fn config(State(server): State<TestServer>) -> (StatusCode, String) {
    server
        .config
        .clone()
        .unwrap_or((StatusCode::NOT_FOUND, String::new()))
}

/// Base URL where nothing is listening.
pub fn dead_url() -> String {
    let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = l.local_addr().unwrap().port();
    format!("http://127.0.0.1:{}", port)
}
