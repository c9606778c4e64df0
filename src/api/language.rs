use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::{error_response, not_found};
use crate::domain::{CreateNamedInput, NamedEntry};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/catalog/languages",
    responses(
        (status = 200, description = "All languages", body = [NamedEntry])
    )
)]
pub async fn list_languages(State(state): State<AppState>) -> impl IntoResponse {
    match state.language_repo.find_all().await {
        Ok(languages) => Json(json!({ "languages": languages })).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/catalog/languages",
    request_body = CreateNamedInput,
    responses(
        (status = 201, description = "Language created", body = NamedEntry),
        (status = 400, description = "Name missing, too long or already taken")
    )
)]
pub async fn create_language(
    State(state): State<AppState>,
    Json(payload): Json<CreateNamedInput>,
) -> impl IntoResponse {
    match state.language_repo.create(payload).await {
        Ok(language) => {
            (StatusCode::CREATED, Json(json!({ "language": language }))).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/language/{id}",
    params(("id" = i32, Path, description = "Language id")),
    responses(
        (status = 200, description = "Language", body = NamedEntry),
        (status = 404, description = "No such language")
    )
)]
pub async fn get_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.language_repo.find_by_id(id).await {
        Ok(Some(language)) => Json(json!({ "language": language })).into_response(),
        Ok(None) => not_found("Language"),
        Err(e) => error_response(e),
    }
}
