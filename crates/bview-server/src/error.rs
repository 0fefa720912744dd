use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bview_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("record {key} in bucket {bucket} is not valid JSON: {source}")]
    MalformedValue {
        bucket: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(e) if e.is_not_found() => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::InvalidName { .. }) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(_)
            | Self::MalformedValue { .. }
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_400() {
        let err = ServerError::from(StoreError::BucketNotFound("b".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let err = ServerError::from(StoreError::KeyNotFound { bucket: "b".into(), key: "k".into() });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn faults_map_to_500() {
        let source = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err = ServerError::MalformedValue { bucket: "b".into(), key: "k".into(), source };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = ServerError::from(StoreError::Randomness("no entropy".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_message_passes_through() {
        let err = ServerError::from(StoreError::BucketNotFound("users".into()));
        assert_eq!(err.to_string(), "bucket not found: users");
    }
}
