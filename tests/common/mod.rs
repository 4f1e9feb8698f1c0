//! In-process stand-in for the parts of CouchDB the store talks to
//!
//! Keeps databases and documents in memory and enforces `_rev` checks on
//! document writes the way CouchDB does.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct CouchState {
    pub databases: BTreeMap<String, BTreeMap<String, Value>>,
    pub document_writes: usize,
    pub database_deletes: usize,
}

#[derive(Clone, Default)]
pub struct FakeCouch {
    state: Arc<Mutex<CouchState>>,
}

impl FakeCouch {
    /// Start on an ephemeral port and return the server URL
    pub async fn start() -> (Self, String) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let fake = FakeCouch::default();
        fake.serve(listener);
        (fake, format!("http://{addr}"))
    }

    /// Start on `addr` after `delay`, simulating a server that comes up late
    pub fn start_later(addr: SocketAddr, delay: std::time::Duration) -> Self {
        let fake = FakeCouch::default();
        let server = fake.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
            server.serve(listener);
        });
        fake
    }

    fn serve(&self, listener: tokio::net::TcpListener) {
        let app = Router::new()
            .route("/", get(root))
            .route("/_all_dbs", get(all_dbs))
            .route("/{db}", put(create_db).delete(delete_db))
            .route("/{db}/_find", post(find))
            .route("/{db}/{id}", get(get_doc).put(put_doc))
            .with_state(self.state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
    }

    pub fn database_names(&self) -> Vec<String> {
        self.state.lock().unwrap().databases.keys().cloned().collect()
    }

    pub fn documents(&self, db: &str) -> BTreeMap<String, Value> {
        self.state
            .lock()
            .unwrap()
            .databases
            .get(db)
            .cloned()
            .unwrap_or_default()
    }

    /// Seed a document as if another writer had stored it
    pub fn insert_document(&self, db: &str, id: &str, mut doc: Value) {
        doc["_id"] = json!(id);
        doc["_rev"] = json!("1-seeded");
        self.state
            .lock()
            .unwrap()
            .databases
            .entry(db.to_string())
            .or_default()
            .insert(id.to_string(), doc);
    }

    pub fn document_writes(&self) -> usize {
        self.state.lock().unwrap().document_writes
    }

    pub fn database_deletes(&self) -> usize {
        self.state.lock().unwrap().database_deletes
    }
}

type Shared = Arc<Mutex<CouchState>>;

fn error(status: StatusCode, error: &str, reason: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"error": error, "reason": reason})))
}

async fn root() -> Json<Value> {
    Json(json!({"couchdb": "Welcome", "version": "3.3.3"}))
}

async fn all_dbs(State(state): State<Shared>) -> Json<Vec<String>> {
    Json(state.lock().unwrap().databases.keys().cloned().collect())
}

async fn create_db(State(state): State<Shared>, Path(db): Path<String>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if state.databases.contains_key(&db) {
        return error(
            StatusCode::PRECONDITION_FAILED,
            "file_exists",
            "The database could not be created, the file already exists.",
        );
    }
    state.databases.insert(db, BTreeMap::new());
    (StatusCode::CREATED, Json(json!({"ok": true})))
}

async fn delete_db(State(state): State<Shared>, Path(db): Path<String>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if state.databases.remove(&db).is_none() {
        return error(StatusCode::NOT_FOUND, "not_found", "Database does not exist.");
    }
    state.database_deletes += 1;
    (StatusCode::OK, Json(json!({"ok": true})))
}

async fn get_doc(
    State(state): State<Shared>,
    Path((db, id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    let Some(docs) = state.databases.get(&db) else {
        return error(StatusCode::NOT_FOUND, "not_found", "Database does not exist.");
    };
    match docs.get(&id) {
        Some(doc) => (StatusCode::OK, Json(doc.clone())),
        None => error(StatusCode::NOT_FOUND, "not_found", "missing"),
    }
}

async fn put_doc(
    State(state): State<Shared>,
    Path((db, id)): Path<(String, String)>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    let Some(docs) = state.databases.get_mut(&db) else {
        return error(StatusCode::NOT_FOUND, "not_found", "Database does not exist.");
    };

    let current_rev = docs
        .get(&id)
        .and_then(|doc| doc.get("_rev"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let given_rev = body.get("_rev").and_then(Value::as_str).map(str::to_string);

    if current_rev != given_rev {
        return error(StatusCode::CONFLICT, "conflict", "Document update conflict.");
    }

    let generation = current_rev
        .as_deref()
        .and_then(|rev| rev.split('-').next())
        .and_then(|n| n.parse::<u64>().ok())
        .unwrap_or(0);
    let new_rev = format!("{}-fake{}", generation + 1, generation + 1);

    body["_id"] = json!(id);
    body["_rev"] = json!(new_rev);
    docs.insert(id.clone(), body);
    state.document_writes += 1;

    (
        StatusCode::CREATED,
        Json(json!({"ok": true, "id": id, "rev": new_rev})),
    )
}

async fn find(
    State(state): State<Shared>,
    Path(db): Path<String>,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    let Some(docs) = state.databases.get(&db) else {
        return error(StatusCode::NOT_FOUND, "not_found", "Database does not exist.");
    };
    let limit = request.get("limit").and_then(Value::as_u64).unwrap_or(25) as usize;
    let found: Vec<Value> = docs.values().take(limit).cloned().collect();
    (StatusCode::OK, Json(json!({"docs": found})))
}
