//! Printing service endpoints: list and register.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{now_ms, Db};
use crate::error::{bad_request, internal, ApiError};

/// A community printing service offer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRow {
    pub id: i64,
    pub name: String,
    pub postal_code: String,
    pub printers: String,
    pub hourly_rate: String,
    pub email: String,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: Option<String>,
    pub postal_code: Option<String>,
    pub printers: Option<String>,
    pub hourly_rate: Option<String>,
    pub email: Option<String>,
}

/// GET /api/printing-services
pub async fn list(State(db): State<Db>) -> Result<Json<Vec<ServiceRow>>, ApiError> {
    let rows = list_services(&db.pool)
        .await
        .map_err(internal("Failed to fetch printing services"))?;
    Ok(Json(rows))
}

/// POST /api/printing-services
pub async fn register(
    State(db): State<Db>,
    Json(body): Json<NewService>,
) -> Result<(StatusCode, Json<ServiceRow>), ApiError> {
    let name = body.name.as_deref().map(str::trim).unwrap_or("");
    let postal_code = body.postal_code.as_deref().map(str::trim).unwrap_or("");
    let printers = body.printers.as_deref().map(str::trim).unwrap_or("");
    let hourly_rate = body.hourly_rate.as_deref().map(str::trim).unwrap_or("");
    let email = body.email.as_deref().map(str::trim).unwrap_or("");

    if [name, postal_code, printers, hourly_rate, email]
        .iter()
        .any(|f| f.is_empty())
    {
        return Err(bad_request("All fields are required"));
    }
    if !valid_email(email) {
        return Err(bad_request("Invalid email format"));
    }

    let row = insert_service(&db.pool, name, postal_code, printers, hourly_rate, email)
        .await
        .map_err(internal("Failed to register printing service"))?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Offers, newest first.
pub async fn list_services(pool: &SqlitePool) -> Result<Vec<ServiceRow>, sqlx::Error> {
    sqlx::query_as::<_, ServiceRow>(
        "SELECT id, name, postal_code, printers, hourly_rate, email, timestamp
         FROM printing_services
         ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn insert_service(
    pool: &SqlitePool,
    name: &str,
    postal_code: &str,
    printers: &str,
    hourly_rate: &str,
    email: &str,
) -> Result<ServiceRow, sqlx::Error> {
    let timestamp = now_ms();
    let result = sqlx::query(
        "INSERT INTO printing_services (name, postal_code, printers, hourly_rate, email, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(name)
    .bind(postal_code)
    .bind(printers)
    .bind(hourly_rate)
    .bind(email)
    .bind(timestamp)
    .execute(pool)
    .await?;
    Ok(ServiceRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        postal_code: postal_code.to_string(),
        printers: printers.to_string(),
        hourly_rate: hourly_rate.to_string(),
        email: email.to_string(),
        timestamp,
    })
}

/// Same shape the original web form accepted: one `@` with a non-empty local
/// part, a domain containing a dot, and no whitespace anywhere.
fn valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(valid_email("jo@example.com"));
        assert!(valid_email("jo.print@sub.example.co"));
        assert!(!valid_email("joexample.com"));
        assert!(!valid_email("jo@example"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("jo@.com"));
        assert!(!valid_email("jo@example."));
        assert!(!valid_email("jo @example.com"));
        assert!(!valid_email("jo@exa mple.com"));
        assert!(!valid_email("jo@@example.com"));
    }

    #[tokio::test]
    async fn insert_and_list_newest_first() {
        let db = Db::open_memory().await.unwrap();
        let first = insert_service(&db.pool, "Jo", "10115", "Prusa MK4", "5", "jo@example.com")
            .await
            .unwrap();
        let second = insert_service(&db.pool, "Sam", "20095", "Bambu X1", "7", "sam@example.com")
            .await
            .unwrap();
        for (id, ts) in [(first.id, 1_000i64), (second.id, 2_000)] {
            sqlx::query("UPDATE printing_services SET timestamp = ?1 WHERE id = ?2")
                .bind(ts)
                .bind(id)
                .execute(&db.pool)
                .await
                .unwrap();
        }

        let rows = list_services(&db.pool).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Sam");
        assert_eq!(rows[1].name, "Jo");
        assert!(first.id < second.id);
    }

    #[test]
    fn service_row_serializes_camel_case() {
        let row = ServiceRow {
            id: 1,
            name: "Jo".into(),
            postal_code: "10115".into(),
            printers: "Prusa MK4".into(),
            hourly_rate: "5".into(),
            email: "jo@example.com".into(),
            timestamp: 42,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains(r#""postalCode":"10115""#), "{json}");
        assert!(json.contains(r#""hourlyRate":"5""#), "{json}");
    }
}
