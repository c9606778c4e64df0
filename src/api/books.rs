//! Book API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::{error_response, not_found};
use crate::domain::{Book, CreateBookInput, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/catalog/books",
    responses(
        (status = 200, description = "Books ordered by title", body = [Book])
    )
)]
pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    match state.book_repo.find_all().await {
        Ok(books) => Json(json!({
            "total": books.len(),
            "books": books,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/catalog/books",
    request_body = CreateBookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid field or unknown author, language or genre")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookInput>,
) -> impl IntoResponse {
    match state.book_repo.create(payload).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Book created successfully",
                "book": book
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book with its genres", body = Book),
        (status = 404, description = "No such book")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.book_repo.find_by_id(id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(json!({ "book": book }))).into_response(),
        Ok(None) => not_found("Book"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetGenresRequest {
    pub genre: Vec<i32>,
}

#[utoipa::path(
    put,
    path = "/catalog/book/{id}/genres",
    params(("id" = i32, Path, description = "Book id")),
    request_body = SetGenresRequest,
    responses(
        (status = 200, description = "Book with its new genre set", body = Book),
        (status = 400, description = "Unknown genre id"),
        (status = 404, description = "No such book")
    )
)]
pub async fn set_book_genres(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SetGenresRequest>,
) -> impl IntoResponse {
    match state.book_repo.set_genres(id, payload.genre).await {
        Ok(book) => (StatusCode::OK, Json(json!({ "book": book }))).into_response(),
        Err(DomainError::NotFound) => not_found("Book"),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/catalog/book/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Book still has instances"),
        (status = 404, description = "No such book")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.book_repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Book deleted successfully"})),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Book"),
        Err(e) => error_response(e),
    }
}
