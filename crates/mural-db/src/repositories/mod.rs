//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in mural-core.

mod audit;
mod error;
mod modification_request;
mod mural;

pub use audit::PgAuditRepository;
pub use modification_request::PgModificationRequestRepository;
pub use mural::PgMuralRepository;
