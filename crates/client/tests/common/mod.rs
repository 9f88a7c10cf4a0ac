#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use kukkuta_client::domain::auth::AuthResponse;
use kukkuta_client::{ApiContext, ClientConfig, KukkutaClient, MemoryStore, SessionStore};

/// A request as seen by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Canned reply for one method + path.
#[derive(Debug, Clone)]
pub struct StubRoute {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub body: Value,
}

pub fn route(method: Method, path: &str, status: StatusCode, body: Value) -> StubRoute {
    StubRoute {
        method,
        path: path.to_string(),
        status,
        body,
    }
}

struct StubState {
    routes: Vec<StubRoute>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process backend that answers from a fixed route table and records
/// every request. Unknown routes get FastAPI's 404 body.
pub struct StubBackend {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubBackend {
    pub async fn start(routes: Vec<StubRoute>) -> Self {
        let state = Arc::new(StubState {
            routes,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// `"METHOD /path"` for every recorded request, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: body.to_vec(),
    });

    match state
        .routes
        .iter()
        .find(|r| r.method == method && r.path == uri.path())
    {
        Some(r) => (r.status, Json(r.body.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response(),
    }
}

/// Client wired to `backend` with an inspectable in-memory store.
pub fn client_for(backend: &StubBackend) -> (KukkutaClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = ClientConfig::new(backend.base_url.clone());
    let ctx = ApiContext::new(&config, SessionStore::new(store.clone())).expect("build client");
    (KukkutaClient::from_context(ctx), store)
}

/// Same as [`client_for`] with a session already stored.
pub async fn logged_in_client(
    backend: &StubBackend,
    role: kukkuta_client::domain::roles::UserRole,
) -> (KukkutaClient, Arc<MemoryStore>) {
    let (client, store) = client_for(backend);
    client
        .context()
        .session()
        .save(&AuthResponse {
            access_token: "test-token".into(),
            token_type: "bearer".into(),
            user_id: 1,
            role,
        })
        .await
        .expect("seed session");
    (client, store)
}

pub fn farmer_list_item(id: i64, is_verified: bool) -> Value {
    json!({
        "id": id,
        "user_id": id + 100,
        "phone": "9876543210",
        "address": "Sanjarwas",
        "farm_type": "broiler",
        "experience_years": 4,
        "is_verified": is_verified,
        "created_at": "2024-01-30T10:00:00+00:00",
        "updated_at": null,
        "user_email": format!("farmer{id}@example.com"),
        "user_full_name": format!("Farmer {id}"),
        "user_is_active": true,
        "farm_count": 1
    })
}

pub fn routine_response(id: i64) -> Value {
    json!({
        "id": id,
        "farmer_id": 7,
        "date": "2024-02-01T00:00:00+00:00",
        "mortality_count": 3,
        "feed_consumption_kg": 120.5,
        "average_bird_weight_g": 410.0,
        "temperature_celsius": 31.0,
        "created_at": "2024-02-01T08:00:00+00:00"
    })
}
