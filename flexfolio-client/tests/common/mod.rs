// Used by several test binaries, not every helper by each of them
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use flexfolio_client::infra::ApiClient;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Mutable behavior of the stub profile API.
#[derive(Debug, Default)]
pub struct ServerState {
    /// Public listing, as raw JSON so tests can serve malformed records.
    pub listing: Vec<Value>,
    /// Own profiles keyed by bearer token. Unknown tokens get 401.
    pub own: HashMap<String, Value>,
    /// Replaces every response body when set.
    pub raw_body: Option<String>,
    /// Forces every response to this status when set.
    pub force_status: Option<StatusCode>,
    pub delay: Option<Duration>,
    pub requests: usize,
    pub last_authorization: Option<String>,
    pub last_update: Option<Value>,
}

#[derive(Debug)]
pub struct StubServer {
    pub base_url: String,
    state: Arc<Mutex<ServerState>>,
    task: JoinHandle<()>,
}

type Shared = Arc<Mutex<ServerState>>;

fn lock(state: &Shared) -> MutexGuard<'_, ServerState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Record the request and apply the configured delay. Returns an early
/// response when one is forced.
async fn enter(state: &Shared, headers: &HeaderMap) -> Option<Response> {
    let delay = {
        let mut s = lock(state);
        s.requests += 1;
        s.last_authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        s.delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let s = lock(state);
    if let Some(status) = s.force_status {
        return Some((status, "forced failure").into_response());
    }
    s.raw_body.clone().map(|body| {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn list_profiles(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(early) = enter(&state, &headers).await {
        return early;
    }
    Json(Value::Array(lock(&state).listing.clone())).into_response()
}

async fn profile_by_id(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(early) = enter(&state, &headers).await {
        return early;
    }
    let s = lock(&state);
    match s.listing.iter().find(|p| p["user_id"] == json!(id)) {
        Some(profile) => Json(profile.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "profile not found").into_response(),
    }
}

async fn own_profile(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(early) = enter(&state, &headers).await {
        return early;
    }
    let s = lock(&state);
    match bearer(&headers).and_then(|token| s.own.get(&token).cloned()) {
        Some(profile) => Json(profile).into_response(),
        None => (StatusCode::UNAUTHORIZED, "invalid token").into_response(),
    }
}

async fn update_own_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(early) = enter(&state, &headers).await {
        return early;
    }
    let mut s = lock(&state);
    s.last_update = Some(body.clone());
    let Some(token) = bearer(&headers).filter(|t| s.own.contains_key(t)) else {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    };

    // Server-assigned fields survive the replace.
    let mut stored = body;
    if let (Some(existing), Some(object)) = (s.own.get(&token), stored.as_object_mut()) {
        for key in ["user_id", "created_at"] {
            if let Some(value) = existing.get(key) {
                object.insert(key.to_string(), value.clone());
            }
        }
    }
    s.own.insert(token, stored.clone());
    Json(stored).into_response()
}

impl StubServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(ServerState::default()));
        let app = Router::new()
            .route("/users/profiles", get(list_profiles))
            .route("/users/profiles/{id}", get(profile_by_id))
            .route("/users/profile", get(own_profile).post(update_own_profile))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("local addr");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            task,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, ServerState> {
        lock(&self.state)
    }

    pub fn client(&self) -> ApiClient {
        self.client_with_timeout(Duration::from_secs(5))
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> ApiClient {
        ApiClient::new(&self.base_url, timeout).expect("build client")
    }

    pub fn requests(&self) -> usize {
        self.state().requests
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn own_record(name: &str, user_id: &str) -> Value {
    json!({
        "user_id": user_id,
        "name": name,
        "company": "Analytical Engines",
        "role": "Engineer",
        "experience": 12,
        "github_id": "https://github.com/ada",
        "created_at": "2024-03-01T10:00:00Z"
    })
}

pub fn listed_record(user_id: &str, name: &str) -> Value {
    json!({ "user_id": user_id, "name": name })
}
