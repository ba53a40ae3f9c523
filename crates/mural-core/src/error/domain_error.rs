//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ModificationRequestId, MuralId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Mural not found: {0}")]
    MuralNotFound(MuralId),

    #[error("Modification request not found: {0}")]
    ModificationRequestNotFound(ModificationRequestId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid map location: {0}")]
    InvalidMapLocation(String),

    #[error("A usable image reference is required")]
    MissingImage,

    #[error("Invalid decision '{0}': expected \"approve\" or \"reject\"")]
    InvalidDecision(String),

    #[error("Invalid state '{0}'")]
    InvalidState(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Only pending requests can be processed")]
    RequestNotPending,

    #[error("Mural {0} was already modified and approved; no further modifications are accepted")]
    MuralAlreadyModified(MuralId),

    #[error("Mural state changed concurrently; reload and retry")]
    ConcurrentUpdate,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MuralNotFound(_) => "UNKNOWN_MURAL",
            Self::ModificationRequestNotFound(_) => "UNKNOWN_MODIFICATION_REQUEST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidMapLocation(_) => "INVALID_MAP_LOCATION",
            Self::MissingImage => "MISSING_IMAGE",
            Self::InvalidDecision(_) => "INVALID_DECISION",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",

            // Conflict
            Self::RequestNotPending => "REQUEST_NOT_PENDING",
            Self::MuralAlreadyModified(_) => "MURAL_ALREADY_MODIFIED",
            Self::ConcurrentUpdate => "CONCURRENT_UPDATE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MuralNotFound(_) | Self::ModificationRequestNotFound(_)
        )
    }

    /// Check if this is a validation error (bad request)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidMapLocation(_)
                | Self::MissingImage
                | Self::InvalidDecision(_)
                | Self::InvalidState(_)
                | Self::InvalidTransition(_)
        )
    }

    /// Check if this is a conflict with the current state
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::RequestNotPending | Self::MuralAlreadyModified(_) | Self::ConcurrentUpdate
        )
    }
}
