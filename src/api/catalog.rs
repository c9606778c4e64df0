use axum::{Json, extract::State, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;

use super::error_response;
use crate::domain::schema;
use crate::services::catalog_service::{self, CatalogSummary};

#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Record counts for the home page", body = CatalogSummary)
    )
)]
pub async fn index(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match catalog_service::summary(&db).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => error_response(e),
    }
}

/// Field labels, limits and help text per entity
#[utoipa::path(
    get,
    path = "/catalog/schema",
    responses(
        (status = 200, description = "Lists of FieldSpec keyed by entity name")
    )
)]
pub async fn field_schema() -> impl IntoResponse {
    Json(json!({
        "author": schema::author::FIELDS,
        "book": schema::book::FIELDS,
        "bookinstance": schema::book_instance::FIELDS,
        "genre": schema::genre::FIELDS,
        "language": schema::language::FIELDS,
    }))
}
