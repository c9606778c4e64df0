//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM entities, no Axum).
//! Only trait definitions, field declarations, the overdue rule and domain
//! error types.

pub mod errors;
pub mod overdue;
pub mod repositories;
pub mod schema;

pub use errors::DomainError;
pub use overdue::is_overdue;
pub use repositories::*;
