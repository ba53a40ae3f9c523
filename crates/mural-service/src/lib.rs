//! # mural-service
//!
//! Application layer containing the moderation engine, the audit trail,
//! read projections and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AdminMuralFilter, AuditService, ModerationService, QueryService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
