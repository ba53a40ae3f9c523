//! `MemoryStore`: vectors of murals, requests and audit rows under one lock

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use mural_core::entities::{
    AuditQuery, AuditRecord, ModificationApproval, ModificationRequest, Mural, MuralState,
};
use mural_core::error::DomainError;
use mural_core::traits::{
    AuditRepository, ModificationRequestRepository, MuralRepository, RepoResult,
};
use mural_core::value_objects::{ModificationRequestId, MuralId};

#[derive(Debug, Default)]
struct Tables {
    murals: Vec<Mural>,
    requests: Vec<ModificationRequest>,
    audit: Vec<AuditRecord>,
}

impl Tables {
    fn mural_mut(&mut self, id: MuralId) -> Option<&mut Mural> {
        self.murals.iter_mut().find(|m| m.id == id)
    }

    fn request_mut(&mut self, id: ModificationRequestId) -> Option<&mut ModificationRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }
}

/// Cheaply cloneable handle; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every audit record, oldest first
    pub fn audit_records(&self) -> Vec<AuditRecord> {
        self.tables.lock().audit.clone()
    }

    /// Overwrite a mural row directly, bypassing moderation rules (test setup)
    pub fn put_mural(&self, mural: Mural) {
        let mut tables = self.tables.lock();
        match tables.mural_mut(mural.id) {
            Some(existing) => *existing = mural,
            None => tables.murals.push(mural),
        }
    }
}

fn newest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    // rows arrive in insertion order; reverse first so ties keep newest-inserted first
    rows.reverse();
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

#[async_trait]
impl MuralRepository for MemoryStore {
    async fn find_by_id(&self, id: MuralId) -> RepoResult<Option<Mural>> {
        Ok(self.tables.lock().murals.iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self, states: Option<&[MuralState]>) -> RepoResult<Vec<Mural>> {
        let rows: Vec<Mural> = self
            .tables
            .lock()
            .murals
            .iter()
            .filter(|m| states.map_or(true, |states| states.contains(&m.state)))
            .cloned()
            .collect();
        Ok(newest_first(rows, |m| m.created_at))
    }

    async fn create(&self, mural: &Mural) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.murals.iter().any(|m| m.id == mural.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate key murals.id = {}",
                mural.id
            )));
        }
        tables.murals.push(mural.clone());
        Ok(())
    }

    async fn transition_state(
        &self,
        id: MuralId,
        expected: MuralState,
        next: MuralState,
    ) -> RepoResult<Option<Mural>> {
        let mut tables = self.tables.lock();
        let Some(mural) = tables.mural_mut(id) else {
            return Ok(None);
        };
        if mural.state != expected {
            return Ok(None);
        }
        mural.state = next;
        mural.updated_at = Utc::now();
        Ok(Some(mural.clone()))
    }

    async fn count_by_state(&self) -> RepoResult<Vec<(MuralState, i64)>> {
        let tables = self.tables.lock();
        let mut counts: HashMap<MuralState, i64> = HashMap::new();
        for mural in &tables.murals {
            *counts.entry(mural.state).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ModificationRequestRepository for MemoryStore {
    async fn find_by_id(
        &self,
        id: ModificationRequestId,
    ) -> RepoResult<Option<ModificationRequest>> {
        Ok(self.tables.lock().requests.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_mural(&self, mural_id: MuralId) -> RepoResult<Vec<ModificationRequest>> {
        self.list_by_murals(&[mural_id]).await
    }

    async fn list_by_murals(&self, mural_ids: &[MuralId]) -> RepoResult<Vec<ModificationRequest>> {
        let rows: Vec<ModificationRequest> = self
            .tables
            .lock()
            .requests
            .iter()
            .filter(|r| mural_ids.contains(&r.mural_id))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r| r.created_at))
    }

    async fn create(&self, request: &ModificationRequest) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let mural = tables
            .murals
            .iter()
            .find(|m| m.id == request.mural_id)
            .ok_or(DomainError::MuralNotFound(request.mural_id))?;
        mural.ensure_accepts_modification_requests()?;

        let mut row = request.clone();
        row.state = mural_core::entities::RequestState::Pending;
        tables.requests.push(row);
        Ok(())
    }

    async fn reject(
        &self,
        id: ModificationRequestId,
        processed_at: DateTime<Utc>,
    ) -> RepoResult<Option<ModificationRequest>> {
        let mut tables = self.tables.lock();
        let Some(request) = tables.request_mut(id) else {
            return Ok(None);
        };
        Ok(request.reject(processed_at).then(|| request.clone()))
    }

    async fn approve(&self, approval: &ModificationApproval) -> RepoResult<()> {
        let mut tables = self.tables.lock();

        let mural = tables
            .murals
            .iter()
            .find(|m| m.id == approval.mural_id)
            .ok_or(DomainError::MuralNotFound(approval.mural_id))?;
        if mural.state == MuralState::ModificationApproved {
            return Err(DomainError::MuralAlreadyModified(approval.mural_id));
        }

        let request = tables
            .requests
            .iter()
            .find(|r| r.id == approval.request_id && r.mural_id == approval.mural_id)
            .ok_or(DomainError::RequestNotPending)?;
        if !request.is_pending() {
            return Err(DomainError::RequestNotPending);
        }

        // both checks passed under the lock; apply both writes
        if let Some(request) = tables.request_mut(approval.request_id) {
            request.approve(approval);
        }
        if let Some(mural) = tables.mural_mut(approval.mural_id) {
            mural.apply_modification(approval);
        }
        Ok(())
    }

    async fn reject_pending_siblings(
        &self,
        mural_id: MuralId,
        keep: ModificationRequestId,
        processed_at: DateTime<Utc>,
    ) -> RepoResult<Vec<ModificationRequestId>> {
        let mut tables = self.tables.lock();
        let rejected = tables
            .requests
            .iter_mut()
            .filter(|r| r.mural_id == mural_id && r.id != keep)
            .filter_map(|r| r.reject(processed_at).then_some(r.id))
            .collect();
        Ok(rejected)
    }

    async fn count_murals_with_pending(&self) -> RepoResult<i64> {
        let tables = self.tables.lock();
        let mut murals: Vec<MuralId> = tables
            .requests
            .iter()
            .filter(|r| r.is_pending())
            .map(|r| r.mural_id)
            .collect();
        murals.sort();
        murals.dedup();
        Ok(murals.len() as i64)
    }
}

#[async_trait]
impl AuditRepository for MemoryStore {
    async fn append(&self, record: &AuditRecord) -> RepoResult<()> {
        self.tables.lock().audit.push(record.clone());
        Ok(())
    }

    async fn list(&self, query: &AuditQuery) -> RepoResult<Vec<AuditRecord>> {
        let rows: Vec<AuditRecord> = self
            .tables
            .lock()
            .audit
            .iter()
            .filter(|r| query.target_id.map_or(true, |id| r.target_id == id))
            .filter(|r| query.target_kind.map_or(true, |kind| r.target_kind == kind))
            .cloned()
            .collect();

        Ok(newest_first(rows, |r| r.created_at)
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(0))
            .take(usize::try_from(query.limit).unwrap_or(0))
            .collect())
    }
}
