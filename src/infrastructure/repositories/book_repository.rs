//! SeaORM implementation of BookRepository

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::schema::book as fields;
use crate::domain::{Book, BookRepository, CreateBookInput, DomainError, NamedEntry};
use crate::models::book::{self, ActiveModel, Column, Entity as BookEntity};
use crate::models::{author, book_genres, book_instance, genre, language};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve author, language and genres into the API shape
    async fn to_dto(&self, model: book::Model) -> Result<Book, DomainError> {
        let author = match model.author_id {
            Some(id) => author::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };
        let language = match model.language_id {
            Some(id) => language::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };
        let genres = model.genres(&self.db).await?;
        let display_genre = book::display_genre(genres.iter().map(|g| g.name.as_str()));

        Ok(Book {
            display: model.to_string(),
            url: model.get_absolute_url(),
            id: model.id,
            title: model.title,
            summary: model.summary,
            isbn: model.isbn,
            author_id: model.author_id,
            author: author.map(|a| a.to_string()),
            language_id: model.language_id,
            language: language.map(|l| l.name),
            genres: genres.into_iter().map(NamedEntry::from).collect(),
            display_genre,
        })
    }
}

/// Reject genre ids that do not exist and collapse duplicates
async fn resolve_genres<C>(db: &C, genre_ids: Vec<i32>) -> Result<BTreeSet<i32>, DomainError>
where
    C: ConnectionTrait,
{
    let wanted: BTreeSet<i32> = genre_ids.into_iter().collect();
    if wanted.is_empty() {
        return Ok(wanted);
    }

    let found = genre::Entity::find()
        .filter(genre::Column::Id.is_in(wanted.iter().copied()))
        .count(db)
        .await?;

    if found as usize != wanted.len() {
        return Err(DomainError::Validation(format!(
            "unknown genre in {:?}",
            wanted
        )));
    }
    Ok(wanted)
}

async fn link_genres<C>(db: &C, book_id: i32, genre_ids: &BTreeSet<i32>) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    book_genres::Entity::delete_many()
        .filter(book_genres::Column::BookId.eq(book_id))
        .exec(db)
        .await?;

    if genre_ids.is_empty() {
        return Ok(());
    }

    let links = genre_ids.iter().map(|&genre_id| book_genres::ActiveModel {
        book_id: Set(book_id),
        genre_id: Set(genre_id),
    });
    book_genres::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        let mut book_dtos = Vec::with_capacity(books.len());
        for model in books {
            book_dtos.push(self.to_dto(model).await?);
        }
        Ok(book_dtos)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        match BookEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.to_dto(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError> {
        fields::TITLE.check(&input.title)?;
        fields::SUMMARY.check(&input.summary)?;
        fields::ISBN.check(&input.isbn)?;
        fields::AUTHOR.check_present(input.author_id.as_ref())?;
        fields::LANGUAGE.check_present(input.language_id.as_ref())?;

        if let Some(author_id) = input.author_id {
            if author::Entity::find_by_id(author_id).one(&self.db).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "author {} does not exist",
                    author_id
                )));
            }
        }
        if let Some(language_id) = input.language_id {
            if language::Entity::find_by_id(language_id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(DomainError::Validation(format!(
                    "language {} does not exist",
                    language_id
                )));
            }
        }

        let txn = self.db.begin().await?;
        let genre_ids = resolve_genres(&txn, input.genre).await?;

        let new_book = ActiveModel {
            title: Set(input.title),
            summary: Set(input.summary),
            isbn: Set(input.isbn),
            author_id: Set(input.author_id),
            language_id: Set(input.language_id),
            ..Default::default()
        };
        let result = new_book.insert(&txn).await?;
        link_genres(&txn, result.id, &genre_ids).await?;
        txn.commit().await?;

        tracing::debug!(book_id = result.id, genres = genre_ids.len(), "Created book");
        self.to_dto(result).await
    }

    async fn set_genres(&self, id: i32, genre_ids: Vec<i32>) -> Result<Book, DomainError> {
        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let txn = self.db.begin().await?;
        let genre_ids = resolve_genres(&txn, genre_ids).await?;
        link_genres(&txn, id, &genre_ids).await?;
        txn.commit().await?;

        self.to_dto(existing).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        // SQLite reports ON DELETE RESTRICT as a trigger constraint, so check first
        let copies = book_instance::Entity::find()
            .filter(book_instance::Column::BookId.eq(id))
            .count(&self.db)
            .await?;
        if copies > 0 {
            return Err(DomainError::Validation(format!(
                "book still has {} instance(s)",
                copies
            )));
        }

        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
