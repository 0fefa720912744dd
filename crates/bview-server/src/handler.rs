use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use bview_store::{BucketStore, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ServerError, ServerResult};
use crate::render;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BucketStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BucketStore>) -> Self {
        Self { store }
    }
}

/// Run a store call on the blocking pool. Each call is one transaction.
async fn with_store<T, F>(state: &AppState, f: F) -> ServerResult<T>
where
    F: FnOnce(&dyn BucketStore) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(ServerError::from)
}

fn parse_record(bucket: &str, key: &str, bytes: &[u8]) -> ServerResult<Value> {
    serde_json::from_slice(bytes).map_err(|source| ServerError::MalformedValue {
        bucket: bucket.to_string(),
        key: key.to_string(),
        source,
    })
}

/// Error rendered as an HTML page for the browser views.
pub struct PageError(ServerError);

impl From<ServerError> for PageError {
    fn from(err: ServerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServerError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            other => other.status(),
        };
        if status.is_server_error() {
            tracing::warn!(error = %self.0, "page failed");
        }
        (status, Html(render::error_page(&self.0.to_string()))).into_response()
    }
}

/// GET / -- list of buckets.
pub async fn bucket_list_handler(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let buckets = with_store(&state, |store| store.list_buckets()).await?;
    Ok(Html(render::bucket_list_page(&buckets)))
}

/// GET /bucket/:name -- every record of one bucket.
pub async fn bucket_content_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, PageError> {
    let bucket = name.clone();
    let entries = with_store(&state, move |store| store.entries(&bucket)).await?;
    Ok(Html(render::bucket_page(&name, &entries)))
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub id: Option<String>,
}

impl RecordQuery {
    fn require_id(self) -> ServerResult<String> {
        self.id
            .ok_or_else(|| ServerError::BadRequest("missing id query parameter".into()))
    }
}

/// GET /rest/:bucket/:action -- `all` records or `one` by `?id=`.
pub async fn rest_get_handler(
    State(state): State<AppState>,
    Path((bucket, action)): Path<(String, String)>,
    Query(query): Query<RecordQuery>,
) -> ServerResult<Json<Value>> {
    match action.as_str() {
        "all" => {
            let name = bucket.clone();
            let entries = with_store(&state, move |store| store.entries(&name)).await?;
            let records = entries
                .iter()
                .map(|(key, bytes)| parse_record(&bucket, key, bytes))
                .collect::<ServerResult<Vec<Value>>>()?;
            Ok(Json(Value::Array(records)))
        }
        "one" => {
            let id = query.require_id()?;
            let (name, key) = (bucket.clone(), id.clone());
            let bytes = with_store(&state, move |store| store.get(&name, &key)).await?;
            Ok(Json(parse_record(&bucket, &id, &bytes)?))
        }
        other => Err(ServerError::BadRequest(format!("unknown action: {other}"))),
    }
}

/// Body of POST /rest.
#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    pub bucket: String,
    #[serde(default)]
    pub id: Option<String>,
    pub value: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertResponse {
    pub bucket: String,
    pub id: String,
}

/// POST /rest -- store `value` under `id`, generating the id when absent.
pub async fn rest_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<UpsertRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<UpsertResponse>)> {
    let Json(req) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let bytes = serde_json::to_vec(&req.value).map_err(|e| ServerError::Internal(e.to_string()))?;
    let bucket = req.bucket.clone();
    let id = match req.id {
        Some(id) => {
            let key = id.clone();
            with_store(&state, move |store| store.set(&bucket, &key, &bytes)).await?;
            id
        }
        None => with_store(&state, move |store| store.insert(&bucket, &bytes))
            .await?
            .to_string(),
    };
    tracing::debug!(bucket = %req.bucket, %id, "upserted record");
    Ok((StatusCode::CREATED, Json(UpsertResponse { bucket: req.bucket, id })))
}

/// DELETE /rest/:bucket?id= -- remove one record.
pub async fn rest_delete_handler(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Query(query): Query<RecordQuery>,
) -> ServerResult<StatusCode> {
    let id = query.require_id()?;
    with_store(&state, move |store| store.delete(&bucket, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
