//! Stand-in container engine for the HTTP client tests.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const CONTAINER_ID: &str = "abc123";
pub const CONTAINER_IP: &str = "172.17.0.2";

/// Requests seen by the stand-in engine.
#[derive(Clone, Default)]
pub struct Recorded {
    inner: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorded {
    fn push(&self, op: &str, body: Value) {
        self.inner.lock().unwrap().push((op.to_string(), body));
    }

    pub fn ops(&self) -> Vec<String> {
        self.inner.lock().unwrap().iter().map(|(op, _)| op.clone()).collect()
    }

    pub fn create_body(&self) -> Value {
        self.inner
            .lock()
            .unwrap()
            .iter()
            .find(|(op, _)| op == "create")
            .map(|(_, body)| body.clone())
            .expect("no create request recorded")
    }
}

#[derive(Clone)]
struct Engine {
    recorded: Recorded,
    ip: String,
}

async fn create(State(engine): State<Engine>, Json(body): Json<Value>) -> impl IntoResponse {
    engine.recorded.push("create", body);
    (
        StatusCode::CREATED,
        Json(json!({ "Id": CONTAINER_ID, "Warnings": [] })),
    )
}

async fn start(State(engine): State<Engine>, Path(id): Path<String>) -> impl IntoResponse {
    engine.recorded.push(&format!("start {id}"), Value::Null);
    if id != CONTAINER_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("No such container: {id}") })),
        )
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn inspect(State(engine): State<Engine>, Path(id): Path<String>) -> impl IntoResponse {
    engine.recorded.push(&format!("inspect {id}"), Value::Null);
    Json(json!({
        "Id": id,
        "State": { "Running": true },
        "NetworkSettings": { "IPAddress": engine.ip, "Ports": {} }
    }))
}

/// Serve a stand-in engine on an ephemeral port; returns its `tcp://` URL.
pub async fn spawn_engine(api_version: &str, ip: &str) -> (String, Recorded) {
    let recorded = Recorded::default();
    let state = Engine {
        recorded: recorded.clone(),
        ip: ip.to_string(),
    };

    let prefix = format!("/v{api_version}/containers");
    let app = Router::new()
        .route(&format!("{prefix}/create"), post(create))
        .route(&format!("{prefix}/{{id}}/start"), post(start))
        .route(&format!("{prefix}/{{id}}/json"), get(inspect))
        .with_state(state);

    (serve(app).await, recorded)
}

/// Serve an engine that answers every request with `status` and a `{"message"}` body.
pub async fn spawn_failing_engine(status: StatusCode, message: &'static str) -> String {
    let app = Router::new().fallback(move || async move { (status, Json(json!({ "message": message }))) });
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("tcp://{addr}")
}
