//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit_record;
mod modification_request;
mod mural;

pub use audit_record::AuditRecordModel;
pub use modification_request::ModificationRequestModel;
pub use mural::{MuralModel, StateCountModel};
