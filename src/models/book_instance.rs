use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::overdue;
use crate::urls;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_instances")]
pub struct Model {
    /// Unique ID for this particular book across whole library
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    /// Book availability, one character:
    /// - `m`: Maintenance
    /// - `o`: On loan
    /// - `a`: Available
    /// - `r`: Reserved
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn get_absolute_url(&self) -> String {
        urls::reverse(urls::BOOK_INSTANCE_DETAIL, self.id)
    }

    /// Overdue relative to the local clock.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(overdue::today())
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        overdue::is_overdue(self.due_back, today)
    }

    /// `"<id> (<book title>)"`
    pub fn display(&self, book: &super::book::Model) -> String {
        format!("{} ({})", self.id, book.title)
    }
}
