//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::DomainError;

/// Lets a PATCH body tell "field absent" apart from "field set to null".
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Author data for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub display: String,
    pub url: String,
}

/// Input for creating an author
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAuthorInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors, ordered by last name then first name
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError>;

    /// Create a new author
    async fn create(&self, input: CreateAuthorInput) -> Result<Author, DomainError>;

    /// Delete an author by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Genre or language: both are a bare name with an id
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NamedEntry {
    pub id: i32,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateNamedInput {
    pub name: String,
}

#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<NamedEntry>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<NamedEntry>, DomainError>;
    async fn create(&self, input: CreateNamedInput) -> Result<NamedEntry, DomainError>;
}

#[async_trait]
pub trait LanguageRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<NamedEntry>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<NamedEntry>, DomainError>;
    async fn create(&self, input: CreateNamedInput) -> Result<NamedEntry, DomainError>;
}

/// Book data for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    /// Display form of the author, `"<last>, <first>"`
    pub author: Option<String>,
    pub language_id: Option<i32>,
    pub language: Option<String>,
    pub genres: Vec<NamedEntry>,
    pub display_genre: String,
    pub display: String,
    pub url: String,
}

/// Input for creating a book
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookInput {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    /// Genre ids; duplicates are collapsed
    #[serde(default)]
    pub genre: Vec<i32>,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books ordered by title
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a new book together with its genre links
    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError>;

    /// Replace the genre set of a book
    async fn set_genres(&self, id: i32, genre_ids: Vec<i32>) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Availability of a physical copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[default]
    #[serde(rename = "m")]
    Maintenance,
    #[serde(rename = "o")]
    OnLoan,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 4] = [
        LoanStatus::Maintenance,
        LoanStatus::OnLoan,
        LoanStatus::Available,
        LoanStatus::Reserved,
    ];

    /// Single-character code stored in the database
    pub fn code(self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanStatus {
    type Err = DomainError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        LoanStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| DomainError::Validation(format!("unknown loan status '{}'", code)))
    }
}

/// Book instance data for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub status_label: String,
    pub is_overdue: bool,
    pub display: String,
    pub url: String,
}

/// Input for creating a book instance
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookInstanceInput {
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
}

/// Input for updating a book instance; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBookInstanceInput {
    pub status: Option<LoanStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<NaiveDate>)]
    pub due_back: Option<Option<NaiveDate>>,
    pub imprint: Option<String>,
}

/// Repository trait for BookInstance entity
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// Find all instances ordered by due-back date, optionally by status
    async fn find_all(&self, status: Option<LoanStatus>) -> Result<Vec<BookInstance>, DomainError>;

    /// Instances whose due-back date lies before `today`
    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<BookInstance>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookInstance>, DomainError>;

    async fn create(&self, input: CreateBookInstanceInput) -> Result<BookInstance, DomainError>;

    async fn update(&self, id: Uuid, input: UpdateBookInstanceInput)
    -> Result<BookInstance, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
