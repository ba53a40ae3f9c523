//! sqlx error translation shared by the Pg repositories

use mural_core::error::DomainError;
use sqlx::Error as SqlxError;

pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Translate a unique-index violation into a domain conflict
pub fn map_unique_violation<F>(e: SqlxError, conflict: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => conflict(),
        _ => map_db_error(e),
    }
}
