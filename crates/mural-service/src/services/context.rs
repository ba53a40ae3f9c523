//! Service context - dependency container for services
//!
//! Holds the repositories and the settings the services need.

use std::sync::Arc;

use mural_common::AuditConfig;
use mural_core::traits::{AuditRepository, ModificationRequestRepository, MuralRepository};
use mural_db::{PgAuditRepository, PgModificationRequestRepository, PgMuralRepository, PgPool};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap; every clone shares the same repositories.
#[derive(Clone)]
pub struct ServiceContext {
    mural_repo: Arc<dyn MuralRepository>,
    request_repo: Arc<dyn ModificationRequestRepository>,
    audit_repo: Arc<dyn AuditRepository>,
    audit: AuditConfig,
}

impl ServiceContext {
    pub fn new(
        mural_repo: Arc<dyn MuralRepository>,
        request_repo: Arc<dyn ModificationRequestRepository>,
        audit_repo: Arc<dyn AuditRepository>,
        audit: AuditConfig,
    ) -> Self {
        Self {
            mural_repo,
            request_repo,
            audit_repo,
            audit,
        }
    }

    /// Wire the PostgreSQL repositories over one pool
    pub fn postgres(pool: PgPool, audit: AuditConfig) -> Self {
        Self::new(
            Arc::new(PgMuralRepository::new(pool.clone())),
            Arc::new(PgModificationRequestRepository::new(pool.clone())),
            Arc::new(PgAuditRepository::new(pool)),
            audit,
        )
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn mural_repo(&self) -> &dyn MuralRepository {
        self.mural_repo.as_ref()
    }

    pub fn request_repo(&self) -> &dyn ModificationRequestRepository {
        self.request_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditRepository {
        self.audit_repo.as_ref()
    }

    // === Settings ===

    /// Paging limits for the audit listing
    pub fn audit_config(&self) -> &AuditConfig {
        &self.audit
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("audit", &self.audit)
            .finish()
    }
}

/// Builder for creating a ServiceContext from individual repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    mural_repo: Option<Arc<dyn MuralRepository>>,
    request_repo: Option<Arc<dyn ModificationRequestRepository>>,
    audit_repo: Option<Arc<dyn AuditRepository>>,
    audit: Option<AuditConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mural_repo(mut self, repo: Arc<dyn MuralRepository>) -> Self {
        self.mural_repo = Some(repo);
        self
    }

    pub fn request_repo(mut self, repo: Arc<dyn ModificationRequestRepository>) -> Self {
        self.request_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn audit_config(mut self, audit: AuditConfig) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.mural_repo
                .ok_or_else(|| ServiceError::validation("mural_repo is required"))?,
            self.request_repo
                .ok_or_else(|| ServiceError::validation("request_repo is required"))?,
            self.audit_repo
                .ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            self.audit.unwrap_or_default(),
        ))
    }
}
