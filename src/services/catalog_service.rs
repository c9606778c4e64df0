//! Catalog Service - home page counts without the HTTP layer

use sea_orm::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DomainError, LoanStatus};
use crate::models::{author, book, book_instance, genre};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub num_books: u64,
    pub num_instances: u64,
    pub num_instances_available: u64,
    pub num_authors: u64,
    pub num_genres: u64,
}

/// Count books, copies, available copies, authors and genres.
pub async fn summary(db: &DatabaseConnection) -> Result<CatalogSummary, DomainError> {
    let num_books = book::Entity::find().count(db).await?;
    let num_instances = book_instance::Entity::find().count(db).await?;
    let num_instances_available = book_instance::Entity::find()
        .filter(book_instance::Column::Status.eq(LoanStatus::Available.code()))
        .count(db)
        .await?;
    let num_authors = author::Entity::find().count(db).await?;
    let num_genres = genre::Entity::find().count(db).await?;

    tracing::debug!(num_books, num_instances, num_instances_available, "Catalog summary");

    Ok(CatalogSummary {
        num_books,
        num_instances,
        num_instances_available,
        num_authors,
        num_genres,
    })
}
