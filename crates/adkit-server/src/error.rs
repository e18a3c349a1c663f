//! JSON error responses shared by the route handlers.
//!
//! Every failure body has the shape `{"error": "<message>"}`. Internal
//! errors keep a stable public message; the cause goes to the log only.

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub type ApiError = (StatusCode, Json<Value>);

pub fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

pub fn not_found(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
}

pub fn internal(public: &'static str) -> impl Fn(sqlx::Error) -> ApiError {
    move |err| {
        tracing::error!("{public}: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": public })),
        )
    }
}
