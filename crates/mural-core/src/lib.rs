//! # mural-core
//!
//! Domain layer for the community mural map: entities, value objects, the
//! moderation state rules, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuditAction, AuditQuery, AuditRecord, Decision, ModificationApproval, ModificationRequest,
    Mural, MuralState, RequestState, TargetKind,
};
pub use error::DomainError;
pub use traits::{AuditRepository, ModificationRequestRepository, MuralRepository, RepoResult};
pub use value_objects::{
    ActionContext, Actor, AuditRecordId, Coordinates, IdParseError, ImageRef, MapLocation,
    ModificationRequestId, MuralId, RequestMeta,
};
