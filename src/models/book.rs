use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

use crate::urls;

/// How many genre names `display_genre` lists.
pub const DISPLAY_GENRE_LIMIT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub summary: String,
    #[sea_orm(unique)]
    pub isbn: String,
    /// Cleared when the author is deleted
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::language::Entity",
        from = "Column::LanguageId",
        to = "super::language::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Language,
    #[sea_orm(has_many = "super::book_instance::Entity")]
    Instances,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::language::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Language.def()
    }
}

impl Related<super::book_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instances.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_genres::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Path of the book detail page, e.g. `/catalog/book/1`
    pub fn get_absolute_url(&self) -> String {
        urls::reverse(urls::BOOK_DETAIL, self.id)
    }

    /// Genres of this book in display order (ascending genre id).
    pub async fn genres<C>(&self, db: &C) -> Result<Vec<super::genre::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::genre::Entity)
            .order_by_asc(super::genre::Column::Id)
            .all(db)
            .await
    }

    /// Comma separated names of the first genres of this book.
    pub async fn display_genre<C>(&self, db: &C) -> Result<String, DbErr>
    where
        C: ConnectionTrait,
    {
        let genres = self.genres(db).await?;
        Ok(display_genre(genres.iter().map(|g| g.name.as_str())))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Join at most [`DISPLAY_GENRE_LIMIT`] names with `", "`, keeping their order.
pub fn display_genre<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .take(DISPLAY_GENRE_LIMIT)
        .collect::<Vec<_>>()
        .join(", ")
}
