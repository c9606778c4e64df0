//! SeaORM implementation of BookInstanceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::overdue;
use crate::domain::schema::book_instance as fields;
use crate::domain::{
    BookInstance, BookInstanceRepository, CreateBookInstanceInput, DomainError, LoanStatus,
    UpdateBookInstanceInput,
};
use crate::models::book::{self, Entity as BookEntity};
use crate::models::book_instance::{ActiveModel, Column, Entity as InstanceEntity, Model};

/// SeaORM-based implementation of BookInstanceRepository
pub struct SeaOrmBookInstanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_dto(copy: Model, book: Option<book::Model>, today: NaiveDate) -> Result<BookInstance, DomainError> {
    let book = book.ok_or_else(|| {
        DomainError::Internal(format!("book instance {} has no book", copy.id))
    })?;
    let status: LoanStatus = copy.status.parse()?;

    Ok(BookInstance {
        display: copy.display(&book),
        url: copy.get_absolute_url(),
        is_overdue: copy.is_overdue_on(today),
        id: copy.id,
        book_id: copy.book_id,
        book_title: book.title,
        imprint: copy.imprint,
        due_back: copy.due_back,
        status,
        status_label: status.label().to_string(),
    })
}

#[async_trait]
impl BookInstanceRepository for SeaOrmBookInstanceRepository {
    async fn find_all(&self, status: Option<LoanStatus>) -> Result<Vec<BookInstance>, DomainError> {
        let mut query = InstanceEntity::find();

        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status.code()));
        }

        let copies_with_books = query
            .order_by_asc(Column::DueBack)
            .find_also_related(BookEntity)
            .all(&self.db)
            .await?;

        let today = overdue::today();
        copies_with_books
            .into_iter()
            .map(|(copy, book)| to_dto(copy, book, today))
            .collect()
    }

    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<BookInstance>, DomainError> {
        let copies_with_books = InstanceEntity::find()
            .filter(Column::DueBack.is_not_null())
            .order_by_asc(Column::DueBack)
            .find_also_related(BookEntity)
            .all(&self.db)
            .await?;

        copies_with_books
            .into_iter()
            .filter(|(copy, _)| copy.is_overdue_on(today))
            .map(|(copy, book)| to_dto(copy, book, today))
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookInstance>, DomainError> {
        let result = InstanceEntity::find_by_id(id)
            .find_also_related(BookEntity)
            .one(&self.db)
            .await?;

        result
            .map(|(copy, book)| to_dto(copy, book, overdue::today()))
            .transpose()
    }

    async fn create(&self, input: CreateBookInstanceInput) -> Result<BookInstance, DomainError> {
        fields::IMPRINT.check(&input.imprint)?;

        let book = BookEntity::find_by_id(input.book_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DomainError::Validation(format!("book {} does not exist", input.book_id))
            })?;

        let status = input.status.unwrap_or_default();
        let new_copy = ActiveModel {
            id: Set(Uuid::new_v4()),
            book_id: Set(book.id),
            imprint: Set(input.imprint),
            due_back: Set(input.due_back),
            status: Set(status.code().to_string()),
        };

        let result = new_copy.insert(&self.db).await?;
        tracing::debug!(instance_id = %result.id, book_id = book.id, "Created book instance");

        to_dto(result, Some(book), overdue::today())
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateBookInstanceInput,
    ) -> Result<BookInstance, DomainError> {
        let (existing, book) = InstanceEntity::find_by_id(id)
            .find_also_related(BookEntity)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.clone().into();

        if let Some(status) = input.status {
            active.status = Set(status.code().to_string());
        }
        if let Some(due_back) = input.due_back {
            active.due_back = Set(due_back);
        }
        if let Some(imprint) = input.imprint {
            fields::IMPRINT.check(&imprint)?;
            active.imprint = Set(imprint);
        }

        let result = if active.is_changed() {
            active.update(&self.db).await?
        } else {
            existing
        };
        tracing::debug!(instance_id = %result.id, status = %result.status, "Updated book instance");
        to_dto(result, book, overdue::today())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = InstanceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
