//! Entity to model mappers
//!
//! Conversions between domain entities (mural-core) and database models.
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects,
//!   failing on text columns that no longer parse (corrupt or foreign data)
//! - `*Insert` structs: flatten entity data for database writes

mod audit_record;
mod modification_request;
mod mural;

pub use audit_record::AuditRecordInsert;
pub use modification_request::ModificationRequestInsert;
pub use mural::{state_counts, MuralInsert};

use mural_core::DomainError;

pub(crate) fn corrupt_row(table: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("corrupt row in {table}: {detail}"))
}
