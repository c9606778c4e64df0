use std::fmt;

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::urls;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Path of the author detail page, e.g. `/catalog/author/1`
    pub fn get_absolute_url(&self) -> String {
        urls::reverse(urls::AUTHOR_DETAIL, self.id)
    }
}

/// `"<last>, <first>"`
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

impl From<Model> for crate::domain::Author {
    fn from(model: Model) -> Self {
        Self {
            display: model.to_string(),
            url: model.get_absolute_url(),
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            date_of_birth: model.date_of_birth,
            date_of_death: model.date_of_death,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big_bob() -> Model {
        Model {
            id: 1,
            first_name: "Big".to_string(),
            last_name: "Bob".to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn test_display_is_last_name_comma_first_name() {
        assert_eq!(big_bob().to_string(), "Bob, Big");
    }

    #[test]
    fn test_get_absolute_url() {
        assert_eq!(big_bob().get_absolute_url(), "/catalog/author/1");
    }
}
