//! Field declarations for the catalog entities
//!
//! Labels, length limits and help text for every persisted field are
//! declared here once. Repositories call [`FieldSpec::check`] before any
//! write reaches the database, and the HTTP layer exposes the same
//! constants so forms can render them.

use serde::Serialize;
use utoipa::ToSchema;

use super::DomainError;

/// Static metadata for a single persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldSpec {
    pub name: &'static str,
    pub verbose_name: &'static str,
    pub max_length: Option<usize>,
    /// Lower bound on the length; only ISBN uses it.
    pub min_length: Option<usize>,
    pub required: bool,
    pub help_text: &'static str,
}

const REQUIRED: FieldSpec = FieldSpec {
    name: "",
    verbose_name: "",
    max_length: None,
    min_length: None,
    required: true,
    help_text: "",
};

const OPTIONAL: FieldSpec = FieldSpec {
    required: false,
    ..REQUIRED
};

impl FieldSpec {
    /// Validate a string value against this field's constraints.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn check(&self, value: &str) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            if self.required {
                return Err(DomainError::Validation(format!(
                    "{} is required",
                    self.name
                )));
            }
            return Ok(());
        }

        let len = value.chars().count();
        if let Some(max) = self.max_length {
            if len > max {
                return Err(DomainError::Validation(format!(
                    "{} must be at most {} characters (got {})",
                    self.name, max, len
                )));
            }
        }
        if let Some(min) = self.min_length {
            if len < min {
                return Err(DomainError::Validation(format!(
                    "{} must be at least {} characters (got {})",
                    self.name, min, len
                )));
            }
        }
        Ok(())
    }

    /// Validate a foreign key or other non-string value for presence.
    pub fn check_present<T>(&self, value: Option<&T>) -> Result<(), DomainError> {
        if self.required && value.is_none() {
            return Err(DomainError::Validation(format!("{} is required", self.name)));
        }
        Ok(())
    }
}

pub mod author {
    use super::{FieldSpec, OPTIONAL, REQUIRED};

    pub const FIRST_NAME: FieldSpec = FieldSpec {
        name: "first_name",
        verbose_name: "first name",
        max_length: Some(100),
        ..REQUIRED
    };

    pub const LAST_NAME: FieldSpec = FieldSpec {
        name: "last_name",
        verbose_name: "last name",
        max_length: Some(100),
        ..REQUIRED
    };

    pub const DATE_OF_BIRTH: FieldSpec = FieldSpec {
        name: "date_of_birth",
        verbose_name: "date of birth",
        ..OPTIONAL
    };

    pub const DATE_OF_DEATH: FieldSpec = FieldSpec {
        name: "date_of_death",
        verbose_name: "Died",
        ..OPTIONAL
    };

    pub const FIELDS: [FieldSpec; 4] = [FIRST_NAME, LAST_NAME, DATE_OF_BIRTH, DATE_OF_DEATH];
}

pub mod genre {
    use super::{FieldSpec, REQUIRED};

    pub const NAME: FieldSpec = FieldSpec {
        name: "name",
        verbose_name: "name",
        max_length: Some(200),
        help_text: "Enter a book genre (e.g. Science Fiction, French Poetry etc.)",
        ..REQUIRED
    };

    pub const FIELDS: [FieldSpec; 1] = [NAME];
}

pub mod language {
    use super::{FieldSpec, REQUIRED};

    pub const NAME: FieldSpec = FieldSpec {
        name: "name",
        verbose_name: "name",
        max_length: Some(200),
        help_text: "Enter the book's natural language (e.g. English, French, Japanese etc.)",
        ..REQUIRED
    };

    pub const FIELDS: [FieldSpec; 1] = [NAME];
}

pub mod book {
    use super::{FieldSpec, OPTIONAL, REQUIRED};

    pub const TITLE: FieldSpec = FieldSpec {
        name: "title",
        verbose_name: "title",
        max_length: Some(200),
        ..REQUIRED
    };

    pub const SUMMARY: FieldSpec = FieldSpec {
        name: "summary",
        verbose_name: "summary",
        max_length: Some(2000),
        help_text: "Enter a brief description of the book",
        ..REQUIRED
    };

    pub const ISBN: FieldSpec = FieldSpec {
        name: "isbn",
        verbose_name: "ISBN",
        max_length: Some(13),
        min_length: Some(13),
        help_text: "13 Character <a href=\"https://www.isbn-international.org/content/what-isbn\">ISBN number</a>",
        ..REQUIRED
    };

    pub const AUTHOR: FieldSpec = FieldSpec {
        name: "author",
        verbose_name: "author",
        ..REQUIRED
    };

    pub const LANGUAGE: FieldSpec = FieldSpec {
        name: "language",
        verbose_name: "language",
        ..REQUIRED
    };

    pub const GENRE: FieldSpec = FieldSpec {
        name: "genre",
        verbose_name: "genre",
        help_text: "Select a genre for this book",
        ..OPTIONAL
    };

    pub const FIELDS: [FieldSpec; 6] = [TITLE, SUMMARY, ISBN, AUTHOR, LANGUAGE, GENRE];
}

pub mod book_instance {
    use super::{FieldSpec, OPTIONAL, REQUIRED};

    pub const ID: FieldSpec = FieldSpec {
        name: "id",
        verbose_name: "id",
        help_text: "Unique ID for this particular book across whole library",
        ..REQUIRED
    };

    pub const BOOK: FieldSpec = FieldSpec {
        name: "book",
        verbose_name: "book",
        ..REQUIRED
    };

    pub const IMPRINT: FieldSpec = FieldSpec {
        name: "imprint",
        verbose_name: "imprint",
        max_length: Some(200),
        ..REQUIRED
    };

    pub const DUE_BACK: FieldSpec = FieldSpec {
        name: "due_back",
        verbose_name: "due back",
        ..OPTIONAL
    };

    pub const STATUS: FieldSpec = FieldSpec {
        name: "status",
        verbose_name: "status",
        max_length: Some(1),
        help_text: "Book availability",
        ..REQUIRED
    };

    pub const FIELDS: [FieldSpec; 5] = [ID, BOOK, IMPRINT, DUE_BACK, STATUS];
}
