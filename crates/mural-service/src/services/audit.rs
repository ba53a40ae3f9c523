//! Audit service
//!
//! Appends moderation audit records and lists the trail. Writing is
//! best-effort: a failed append is logged and swallowed, never surfaced to
//! the moderation call that triggered it.

use mural_core::entities::AuditRecord;
use tracing::{debug, error, instrument};

use crate::dto::{AuditListParams, AuditRecordResponse, PaginatedResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Audit service
pub struct AuditService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a record, logging instead of failing
    #[instrument(
        skip(self, record),
        fields(action = %record.action, target_id = %record.target_id)
    )]
    pub async fn record(&self, record: AuditRecord) {
        match self.ctx.audit_repo().append(&record).await {
            Ok(()) => debug!(audit_id = %record.id, "Audit record written"),
            Err(err) => error!(
                error = %err,
                audit_id = %record.id,
                action = %record.action,
                target_kind = %record.target_kind,
                target_id = %record.target_id,
                actor_id = record.actor.as_ref().map(|a| a.id.as_str()),
                "Failed to write audit record"
            ),
        }
    }

    /// List audit records newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: AuditListParams,
    ) -> ServiceResult<PaginatedResponse<AuditRecordResponse>> {
        let config = self.ctx.audit_config();
        let query = params.into_query(config.default_limit, config.max_limit)?;
        let (limit, offset) = (query.limit, query.offset);

        // one extra row tells whether another page exists
        let mut probe = query;
        probe.limit += 1;
        let mut records = self.ctx.audit_repo().list(&probe).await?;

        let has_more = records.len() as i64 > limit;
        records.truncate(limit as usize);

        Ok(PaginatedResponse::new(
            records.into_iter().map(AuditRecordResponse::from).collect(),
            limit,
            offset,
            has_more,
        ))
    }
}
