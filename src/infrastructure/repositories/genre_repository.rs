//! SeaORM implementations of GenreRepository and LanguageRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::schema;
use crate::domain::{CreateNamedInput, DomainError, GenreRepository, LanguageRepository, NamedEntry};
use crate::models::{genre, language};

pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<NamedEntry>, DomainError> {
        let genres = genre::Entity::find()
            .order_by_asc(genre::Column::Id)
            .all(&self.db)
            .await?;

        Ok(genres.into_iter().map(NamedEntry::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<NamedEntry>, DomainError> {
        let genre = genre::Entity::find_by_id(id).one(&self.db).await?;
        Ok(genre.map(NamedEntry::from))
    }

    async fn create(&self, input: CreateNamedInput) -> Result<NamedEntry, DomainError> {
        schema::genre::NAME.check(&input.name)?;

        let model = genre::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(NamedEntry::from(model))
    }
}

pub struct SeaOrmLanguageRepository {
    db: DatabaseConnection,
}

impl SeaOrmLanguageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LanguageRepository for SeaOrmLanguageRepository {
    async fn find_all(&self) -> Result<Vec<NamedEntry>, DomainError> {
        let languages = language::Entity::find()
            .order_by_asc(language::Column::Name)
            .all(&self.db)
            .await?;

        Ok(languages.into_iter().map(NamedEntry::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<NamedEntry>, DomainError> {
        let language = language::Entity::find_by_id(id).one(&self.db).await?;
        Ok(language.map(NamedEntry::from))
    }

    async fn create(&self, input: CreateNamedInput) -> Result<NamedEntry, DomainError> {
        schema::language::NAME.check(&input.name)?;

        let model = language::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(NamedEntry::from(model))
    }
}
