//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AdminMuralsParams, AuditListParams, DecisionRequest, OverrideStateRequest,
    SubmitModificationRequest, SubmitMuralRequest,
};

pub use responses::{
    ActorResponse, AdminMuralResponse, AuditRecordResponse, CoordinatesResponse,
    HealthChecks, HealthResponse, ModerationStatsResponse, ModificationDecisionResponse,
    ModificationRequestResponse, MuralDetailResponse, MuralResponse, PaginatedResponse,
    PaginationMeta, ReadinessResponse, SubmissionReceipt,
};
