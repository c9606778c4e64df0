//! Author API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::{error_response, not_found};
use crate::domain::{Author, CreateAuthorInput, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/catalog/authors",
    responses(
        (status = 200, description = "Authors ordered by last name", body = [Author])
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> impl IntoResponse {
    match state.author_repo.find_all().await {
        Ok(authors) => Json(json!({
            "total": authors.len(),
            "authors": authors,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/catalog/authors",
    request_body = CreateAuthorInput,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Name missing or too long")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<CreateAuthorInput>,
) -> impl IntoResponse {
    match state.author_repo.create(payload).await {
        Ok(author) => (StatusCode::CREATED, Json(json!({ "author": author }))).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author", body = Author),
        (status = 404, description = "No such author")
    )
)]
pub async fn get_author(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.author_repo.find_by_id(id).await {
        Ok(Some(author)) => (StatusCode::OK, Json(json!({ "author": author }))).into_response(),
        Ok(None) => not_found("Author"),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/catalog/author/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted; their books keep no author"),
        (status = 404, description = "No such author")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.author_repo.delete(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Author deleted" }))).into_response(),
        Err(DomainError::NotFound) => not_found("Author"),
        Err(e) => error_response(e),
    }
}
