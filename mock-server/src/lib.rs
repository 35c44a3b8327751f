//! In-memory stand-in for the compte backend, speaking JSON and XML.
//!
//! Responses follow the `accept` header (`…xml` selects markup, anything
//! else gets JSON); request bodies are decoded per `content-type`. XML list
//! responses use the backend's `List`/`item` envelope shape. Lists are
//! sorted by id so cross-format comparisons are deterministic.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicI64, Ordering},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Compte {
    pub id: i64,
    pub solde: f64,
    #[serde(rename = "type")]
    pub kind: CompteKind,
    #[serde(rename = "dateCreation")]
    pub date_creation: NaiveDate,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CompteKind {
    #[serde(rename = "COURANT")]
    Courant,
    #[serde(rename = "EPARGNE")]
    Epargne,
}

/// Client-supplied fields; any id in the payload is ignored, the server
/// assigns (create) or the path names (update) the identifier.
#[derive(Debug, Deserialize)]
pub struct CompteInput {
    pub solde: f64,
    #[serde(rename = "type")]
    pub kind: CompteKind,
    #[serde(rename = "dateCreation")]
    pub date_creation: NaiveDate,
}

/// XML list envelope: `<List><item>…</item>…</List>`.
#[derive(Serialize)]
struct CompteListXml {
    #[serde(rename = "item")]
    items: Vec<Compte>,
}

#[derive(Default)]
pub struct AppState {
    comptes: RwLock<HashMap<i64, Compte>>,
    next_id: AtomicI64,
}

pub type Db = Arc<AppState>;

pub fn app() -> Router {
    let db: Db = Arc::new(AppState::default());
    Router::new()
        .route("/api/comptes", get(list_comptes).post(create_compte))
        .route(
            "/api/comptes/{id}",
            get(get_compte).put(update_compte).delete(delete_compte),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn wants_xml(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("xml"))
}

fn body_is_xml(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("xml"))
}

fn decode_input(headers: &HeaderMap, body: &str) -> Result<CompteInput, String> {
    if body_is_xml(headers) {
        quick_xml::de::from_str(body).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(body).map_err(|e| e.to_string())
    }
}

fn respond_compte(headers: &HeaderMap, status: StatusCode, compte: &Compte) -> Response {
    if wants_xml(headers) {
        match quick_xml::se::to_string_with_root("item", compte) {
            Ok(xml) => (status, [(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    } else {
        match serde_json::to_string(compte) {
            Ok(json) => (status, [(header::CONTENT_TYPE, "application/json")], json).into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }
}

fn respond_list(headers: &HeaderMap, comptes: Vec<Compte>) -> Response {
    if wants_xml(headers) {
        let envelope = CompteListXml { items: comptes };
        match quick_xml::se::to_string_with_root("List", &envelope) {
            Ok(xml) => (StatusCode::OK, [(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    } else {
        match serde_json::to_string(&comptes) {
            Ok(json) => (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], json).into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }
}

async fn list_comptes(State(db): State<Db>, headers: HeaderMap) -> Response {
    let mut comptes: Vec<Compte> = db.comptes.read().await.values().cloned().collect();
    comptes.sort_by_key(|c| c.id);
    respond_list(&headers, comptes)
}

async fn create_compte(State(db): State<Db>, headers: HeaderMap, body: String) -> Response {
    let input = match decode_input(&headers, &body) {
        Ok(input) => input,
        Err(msg) => return (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response(),
    };
    let id = db.next_id.fetch_add(1, Ordering::Relaxed) + 1;
    let compte = Compte {
        id,
        solde: input.solde,
        kind: input.kind,
        date_creation: input.date_creation,
    };
    db.comptes.write().await.insert(id, compte.clone());
    respond_compte(&headers, StatusCode::CREATED, &compte)
}

async fn get_compte(State(db): State<Db>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    match db.comptes.read().await.get(&id) {
        Some(compte) => respond_compte(&headers, StatusCode::OK, compte),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_compte(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let input = match decode_input(&headers, &body) {
        Ok(input) => input,
        Err(msg) => return (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response(),
    };
    let mut comptes = db.comptes.write().await;
    match comptes.get_mut(&id) {
        Some(existing) => {
            existing.solde = input.solde;
            existing.kind = input.kind;
            existing.date_creation = input.date_creation;
            let updated = existing.clone();
            drop(comptes);
            respond_compte(&headers, StatusCode::OK, &updated)
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_compte(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    if db.comptes.write().await.remove(&id).is_some() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
