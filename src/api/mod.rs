pub mod author;
pub mod book_instance;
pub mod books;
pub mod catalog;
pub mod genre;
pub mod health;
pub mod language;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::urls;

/// Routes of the catalog application, relative to `/catalog`
pub fn catalog_router_with_state(state: AppState) -> Router {
    Router::new()
        .route(urls::INDEX, get(catalog::index))
        .route(urls::HEALTH, get(health::health_check))
        .route(urls::SCHEMA, get(catalog::field_schema))
        // Authors
        .route(
            urls::AUTHORS,
            get(author::list_authors).post(author::create_author),
        )
        .route(
            urls::AUTHOR_DETAIL,
            get(author::get_author).delete(author::delete_author),
        )
        // Books
        .route(urls::BOOKS, get(books::list_books).post(books::create_book))
        .route(
            urls::BOOK_DETAIL,
            get(books::get_book).delete(books::delete_book),
        )
        .route(urls::BOOK_GENRES, put(books::set_book_genres))
        // Genres and languages
        .route(urls::GENRES, get(genre::list_genres).post(genre::create_genre))
        .route(urls::GENRE_DETAIL, get(genre::get_genre))
        .route(
            urls::LANGUAGES,
            get(language::list_languages).post(language::create_language),
        )
        .route(urls::LANGUAGE_DETAIL, get(language::get_language))
        // Book instances
        .route(
            urls::BOOK_INSTANCES,
            get(book_instance::list_instances).post(book_instance::create_instance),
        )
        .route(
            urls::BOOK_INSTANCES_OVERDUE,
            get(book_instance::list_overdue),
        )
        .route(
            urls::BOOK_INSTANCE_DETAIL,
            get(book_instance::get_instance)
                .patch(book_instance::update_instance)
                .delete(book_instance::delete_instance),
        )
        .with_state(state)
}

/// Map a domain error onto an HTTP status and `{"error": ...}` body
pub(crate) fn error_response(e: DomainError) -> Response {
    let status = match &e {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Database(_) | DomainError::Internal(_) => {
            tracing::error!("{}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

pub(crate) fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{} not found", what) })),
    )
        .into_response()
}
