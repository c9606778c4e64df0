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
    path = "/catalog/genres",
    responses(
        (status = 200, description = "All genres", body = [NamedEntry])
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> impl IntoResponse {
    match state.genre_repo.find_all().await {
        Ok(genres) => Json(json!({ "genres": genres })).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/catalog/genres",
    request_body = CreateNamedInput,
    responses(
        (status = 201, description = "Genre created", body = NamedEntry),
        (status = 400, description = "Name missing, too long or already taken")
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<CreateNamedInput>,
) -> impl IntoResponse {
    match state.genre_repo.create(payload).await {
        Ok(genre) => (StatusCode::CREATED, Json(json!({ "genre": genre }))).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre", body = NamedEntry),
        (status = 404, description = "No such genre")
    )
)]
pub async fn get_genre(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.genre_repo.find_by_id(id).await {
        Ok(Some(genre)) => Json(json!({ "genre": genre })).into_response(),
        Ok(None) => not_found("Genre"),
        Err(e) => error_response(e),
    }
}
