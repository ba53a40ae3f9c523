//! Domain entities - core business objects

mod audit;
mod modification_request;
mod mural;

pub use audit::{AuditAction, AuditQuery, AuditRecord, TargetKind};
pub use modification_request::{ModificationApproval, ModificationRequest, RequestState};
pub use mural::{Decision, Mural, MuralState};
