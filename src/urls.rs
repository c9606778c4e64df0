//! Catalog URL patterns
//!
//! Route patterns are declared once and used both by the axum router and by
//! the `get_absolute_url` helpers on the entities, so a detail link always
//! points at a route that exists.

use std::fmt::Display;

/// Mount point of the catalog application
pub const CATALOG_PREFIX: &str = "/catalog";

pub const INDEX: &str = "/";
pub const HEALTH: &str = "/health";
pub const SCHEMA: &str = "/schema";

/// Swagger UI, mounted outside the catalog router
pub const DOCS_PATH: &str = "/catalog/docs";
pub const OPENAPI_PATH: &str = "/catalog/api-docs/openapi.json";

pub const AUTHORS: &str = "/authors";
pub const AUTHOR_DETAIL: &str = "/author/:id";
pub const BOOKS: &str = "/books";
pub const BOOK_DETAIL: &str = "/book/:id";
pub const BOOK_GENRES: &str = "/book/:id/genres";
pub const GENRES: &str = "/genres";
pub const GENRE_DETAIL: &str = "/genre/:id";
pub const LANGUAGES: &str = "/languages";
pub const LANGUAGE_DETAIL: &str = "/language/:id";
pub const BOOK_INSTANCES: &str = "/bookinstances";
pub const BOOK_INSTANCES_OVERDUE: &str = "/bookinstances/overdue";
pub const BOOK_INSTANCE_DETAIL: &str = "/bookinstance/:id";

/// Build the absolute path for a detail pattern and an identifier.
pub fn reverse(pattern: &str, id: impl Display) -> String {
    format!("{}{}", CATALOG_PREFIX, pattern.replace(":id", &id.to_string()))
}
