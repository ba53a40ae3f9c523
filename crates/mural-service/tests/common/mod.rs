//! Shared fixtures for service tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mural_core::entities::{
    AuditQuery, AuditRecord, ModificationApproval, ModificationRequest, MuralState,
};
use mural_core::traits::{AuditRepository, ModificationRequestRepository, RepoResult};
use mural_core::value_objects::{ActionContext, Actor, ModificationRequestId, MuralId, RequestMeta};
use mural_core::{Decision, DomainError};
use mural_db::memory::MemoryStore;
use mural_service::dto::{SubmitModificationRequest, SubmitMuralRequest};
use mural_service::{ModerationService, ServiceContext};

pub fn setup() -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::new();
    let ctx = ServiceContext::builder()
        .mural_repo(Arc::new(store.clone()))
        .request_repo(Arc::new(store.clone()))
        .audit_repo(Arc::new(store.clone()))
        .build()
        .unwrap();
    (ctx, store)
}

pub fn moderator() -> ActionContext {
    ActionContext::new(
        Some(Actor::new("mod-1").with_email("mod@example.org").with_name("Ana")),
        RequestMeta {
            ip_address: Some("198.51.100.7".to_string()),
            user_agent: Some("moderation-tests".to_string()),
        },
    )
}

pub fn mural_payload(name: &str) -> SubmitMuralRequest {
    SubmitMuralRequest {
        name: name.to_string(),
        submitter_label: Some("neighbour".to_string()),
        location: "https://www.google.com/maps?q=-34.6037,-58.3816".to_string(),
        comment: Some("original comment".to_string()),
        image_url: format!("https://img.example/{name}.jpg"),
        thumbnail_url: Some(format!("https://img.example/{name}_t.jpg")),
    }
}

pub fn modification_payload(n: u32) -> SubmitModificationRequest {
    SubmitModificationRequest {
        image_url: format!("https://img.example/change-{n}.jpg"),
        thumbnail_url: None,
        comment: None,
    }
}

/// Submit a mural and leave it pending
pub async fn pending_mural(ctx: &ServiceContext, name: &str) -> MuralId {
    let created = ModerationService::new(ctx)
        .submit_mural(mural_payload(name))
        .await
        .unwrap();
    MuralId::parse(&created.id).unwrap()
}

/// Submit a mural and approve it
pub async fn approved_mural(ctx: &ServiceContext, name: &str) -> MuralId {
    let id = pending_mural(ctx, name).await;
    ModerationService::new(ctx)
        .decide_mural(id, Decision::Approve, &moderator())
        .await
        .unwrap();
    id
}

pub async fn submit_request(ctx: &ServiceContext, mural_id: MuralId, n: u32) -> ModificationRequestId {
    let created = ModerationService::new(ctx)
        .submit_modification_request(mural_id, modification_payload(n))
        .await
        .unwrap();
    ModificationRequestId::parse(&created.id).unwrap()
}

pub async fn mural_state(store: &MemoryStore, id: MuralId) -> MuralState {
    mural_core::traits::MuralRepository::find_by_id(store, id)
        .await
        .unwrap()
        .unwrap()
        .state
}

pub async fn request(store: &MemoryStore, id: ModificationRequestId) -> ModificationRequest {
    ModificationRequestRepository::find_by_id(store, id)
        .await
        .unwrap()
        .unwrap()
}

// ============================================================================
// Failure doubles
// ============================================================================

/// Audit sink that is always down
pub struct FailingAuditRepository;

#[async_trait]
impl AuditRepository for FailingAuditRepository {
    async fn append(&self, _record: &AuditRecord) -> RepoResult<()> {
        Err(DomainError::DatabaseError("audit sink unavailable".to_string()))
    }

    async fn list(&self, _query: &AuditQuery) -> RepoResult<Vec<AuditRecord>> {
        Ok(Vec::new())
    }
}

/// Request store whose cascade step always fails
pub struct FailingCascadeRepository(pub MemoryStore);

#[async_trait]
impl ModificationRequestRepository for FailingCascadeRepository {
    async fn find_by_id(
        &self,
        id: ModificationRequestId,
    ) -> RepoResult<Option<ModificationRequest>> {
        ModificationRequestRepository::find_by_id(&self.0, id).await
    }

    async fn list_by_mural(&self, mural_id: MuralId) -> RepoResult<Vec<ModificationRequest>> {
        self.0.list_by_mural(mural_id).await
    }

    async fn list_by_murals(&self, mural_ids: &[MuralId]) -> RepoResult<Vec<ModificationRequest>> {
        self.0.list_by_murals(mural_ids).await
    }

    async fn create(&self, request: &ModificationRequest) -> RepoResult<()> {
        ModificationRequestRepository::create(&self.0, request).await
    }

    async fn reject(
        &self,
        id: ModificationRequestId,
        processed_at: DateTime<Utc>,
    ) -> RepoResult<Option<ModificationRequest>> {
        self.0.reject(id, processed_at).await
    }

    async fn approve(&self, approval: &ModificationApproval) -> RepoResult<()> {
        self.0.approve(approval).await
    }

    async fn reject_pending_siblings(
        &self,
        _mural_id: MuralId,
        _keep: ModificationRequestId,
        _processed_at: DateTime<Utc>,
    ) -> RepoResult<Vec<ModificationRequestId>> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn count_murals_with_pending(&self) -> RepoResult<i64> {
        self.0.count_murals_with_pending().await
    }
}
