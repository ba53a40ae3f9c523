//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Implementations must serialize concurrent
//! writes to the same mural row; the services above them take no locks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AuditQuery, AuditRecord, ModificationApproval, ModificationRequest, Mural, MuralState,
};
use crate::error::DomainError;
use crate::value_objects::{ModificationRequestId, MuralId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Mural Repository
// ============================================================================

#[async_trait]
pub trait MuralRepository: Send + Sync {
    /// Find mural by ID
    async fn find_by_id(&self, id: MuralId) -> RepoResult<Option<Mural>>;

    /// List murals newest first, optionally restricted to the given states
    async fn list(&self, states: Option<&[MuralState]>) -> RepoResult<Vec<Mural>>;

    /// Insert a new mural
    async fn create(&self, mural: &Mural) -> RepoResult<()>;

    /// Compare-and-swap the mural state.
    ///
    /// Returns the updated mural, or `None` when the stored state no longer
    /// equals `expected`.
    async fn transition_state(
        &self,
        id: MuralId,
        expected: MuralState,
        next: MuralState,
    ) -> RepoResult<Option<Mural>>;

    /// Number of murals per state (states with no murals may be omitted)
    async fn count_by_state(&self) -> RepoResult<Vec<(MuralState, i64)>>;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Modification Request Repository
// ============================================================================

#[async_trait]
pub trait ModificationRequestRepository: Send + Sync {
    /// Find request by ID
    async fn find_by_id(&self, id: ModificationRequestId)
        -> RepoResult<Option<ModificationRequest>>;

    /// All requests of one mural, newest first
    async fn list_by_mural(&self, mural_id: MuralId) -> RepoResult<Vec<ModificationRequest>>;

    /// All requests of the given murals, newest first
    async fn list_by_murals(&self, mural_ids: &[MuralId]) -> RepoResult<Vec<ModificationRequest>>;

    /// Insert a pending request.
    ///
    /// Fails with `MuralNotFound` or `MuralAlreadyModified` when the owning
    /// mural is missing or finalized at the moment of insertion.
    async fn create(&self, request: &ModificationRequest) -> RepoResult<()>;

    /// Compare-and-swap `pending` → `rejected`.
    ///
    /// Returns the updated request, or `None` when it was no longer pending.
    async fn reject(
        &self,
        id: ModificationRequestId,
        processed_at: DateTime<Utc>,
    ) -> RepoResult<Option<ModificationRequest>>;

    /// Atomically flip the mural to `modification_approved` with the new image
    /// and mark the request approved with its original-image snapshot.
    ///
    /// Fails with `MuralAlreadyModified` or `RequestNotPending` if either row
    /// changed since the approval was planned; nothing is written in that case.
    async fn approve(&self, approval: &ModificationApproval) -> RepoResult<()>;

    /// Reject every pending request of `mural_id` except `keep`.
    ///
    /// Returns the ids that were rejected by this call.
    async fn reject_pending_siblings(
        &self,
        mural_id: MuralId,
        keep: ModificationRequestId,
        processed_at: DateTime<Utc>,
    ) -> RepoResult<Vec<ModificationRequestId>>;

    /// Number of murals with at least one pending request
    async fn count_murals_with_pending(&self) -> RepoResult<i64>;
}

// ============================================================================
// Audit Repository
// ============================================================================

#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append a record; records are never updated or deleted
    async fn append(&self, record: &AuditRecord) -> RepoResult<()>;

    /// List records newest first
    async fn list(&self, query: &AuditQuery) -> RepoResult<Vec<AuditRecord>>;
}
