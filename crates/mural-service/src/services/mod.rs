//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate repository calls,
//! domain rules and audit emission.

pub mod audit;
pub mod context;
pub mod error;
pub mod moderation;
pub mod query;

pub use audit::AuditService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use moderation::ModerationService;
pub use query::{AdminMuralFilter, QueryService};
