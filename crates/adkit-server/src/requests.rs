//! Feature request endpoints: list, create, and like toggling.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;

use crate::db::{now_ms, Db};
use crate::error::{bad_request, internal, not_found, ApiError};

/// A feature request with its aggregated like count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RequestRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub timestamp: i64,
    pub likes: i64,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub likes: i64,
    pub user_liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeBody {
    pub client_id: Option<String>,
}

/// GET /api/requests
pub async fn list(State(db): State<Db>) -> Result<Json<Vec<RequestRow>>, ApiError> {
    let rows = list_requests(&db.pool)
        .await
        .map_err(internal("Failed to fetch requests"))?;
    Ok(Json(rows))
}

/// POST /api/requests
pub async fn create(
    State(db): State<Db>,
    Json(body): Json<NewRequest>,
) -> Result<(StatusCode, Json<RequestRow>), ApiError> {
    let name = body.name.as_deref().map(str::trim).unwrap_or("");
    let description = body.description.as_deref().map(str::trim).unwrap_or("");
    if name.is_empty() || description.is_empty() {
        return Err(bad_request("Name and description are required"));
    }
    let row = insert_request(&db.pool, name, description)
        .await
        .map_err(internal("Failed to create request"))?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/requests/:id/like
pub async fn toggle_like(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<LikeBody>,
) -> Result<Json<LikeState>, ApiError> {
    let client_id = body.client_id.as_deref().map(str::trim).unwrap_or("");
    if client_id.is_empty() {
        return Err(bad_request("Client ID is required"));
    }
    match toggle(&db.pool, &id, client_id)
        .await
        .map_err(internal("Failed to toggle like"))?
    {
        Some(state) => Ok(Json(state)),
        None => Err(not_found("Request not found")),
    }
}

/// GET /api/requests/:id/likes/:client_id
pub async fn like_status(
    State(db): State<Db>,
    Path((id, client_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let liked = user_liked(&db.pool, &id, &client_id)
        .await
        .map_err(internal("Failed to fetch like status"))?;
    Ok(Json(json!({ "userLiked": liked })))
}

/// Requests ordered by like count, newest first within equal counts.
pub async fn list_requests(pool: &SqlitePool) -> Result<Vec<RequestRow>, sqlx::Error> {
    sqlx::query_as::<_, RequestRow>(
        "SELECT r.id, r.name, r.description, r.timestamp,
                COUNT(l.request_id) AS likes
         FROM requests r
         LEFT JOIN likes l ON l.request_id = r.id
         GROUP BY r.id
         ORDER BY likes DESC, r.timestamp DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn insert_request(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> Result<RequestRow, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    let timestamp = now_ms();
    sqlx::query("INSERT INTO requests (id, name, description, timestamp) VALUES (?1, ?2, ?3, ?4)")
        .bind(&id)
        .bind(name)
        .bind(description)
        .bind(timestamp)
        .execute(pool)
        .await?;
    Ok(RequestRow {
        id,
        name: name.to_string(),
        description: description.to_string(),
        timestamp,
        likes: 0,
    })
}

/// Toggles a client's like. `None` when the request does not exist.
pub async fn toggle(
    pool: &SqlitePool,
    request_id: &str,
    client_id: &str,
) -> Result<Option<LikeState>, sqlx::Error> {
    let known = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM requests WHERE id = ?1")
        .bind(request_id)
        .fetch_one(pool)
        .await?;
    if known == 0 {
        return Ok(None);
    }

    let user_liked = if user_liked(pool, request_id, client_id).await? {
        sqlx::query("DELETE FROM likes WHERE request_id = ?1 AND client_id = ?2")
            .bind(request_id)
            .bind(client_id)
            .execute(pool)
            .await?;
        false
    } else {
        sqlx::query("INSERT INTO likes (request_id, client_id, timestamp) VALUES (?1, ?2, ?3)")
            .bind(request_id)
            .bind(client_id)
            .bind(now_ms())
            .execute(pool)
            .await?;
        true
    };

    let likes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE request_id = ?1")
        .bind(request_id)
        .fetch_one(pool)
        .await?;
    Ok(Some(LikeState { likes, user_liked }))
}

pub async fn user_liked(
    pool: &SqlitePool,
    request_id: &str,
    client_id: &str,
) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM likes WHERE request_id = ?1 AND client_id = ?2",
    )
    .bind(request_id)
    .bind(client_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
