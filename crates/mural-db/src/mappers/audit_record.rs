//! AuditRecord entity <-> model mapper

use mural_core::entities::{AuditAction, AuditRecord, TargetKind};
use mural_core::error::DomainError;
use mural_core::value_objects::{Actor, AuditRecordId, RequestMeta};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::corrupt_row;
use crate::models::AuditRecordModel;

impl TryFrom<AuditRecordModel> for AuditRecord {
    type Error = DomainError;

    fn try_from(model: AuditRecordModel) -> Result<Self, Self::Error> {
        let action = model
            .action
            .parse::<AuditAction>()
            .map_err(|e| corrupt_row("audit_records", e))?;
        let target_kind = model
            .entity_type
            .parse::<TargetKind>()
            .map_err(|e| corrupt_row("audit_records", e))?;

        let actor = model.actor_id.map(|id| Actor {
            id,
            email: model.actor_email,
            name: model.actor_name,
        });

        Ok(AuditRecord {
            id: AuditRecordId::from_uuid(model.id),
            actor,
            action,
            target_kind,
            target_id: model.entity_id,
            before: model.before_state.unwrap_or(JsonValue::Null),
            after: model.after_state.unwrap_or(JsonValue::Null),
            note: model.note,
            request: RequestMeta {
                ip_address: model.ip_address,
                user_agent: model.user_agent,
            },
            created_at: model.created_at,
        })
    }
}

/// Values for appending an audit row
pub struct AuditRecordInsert<'a> {
    pub id: Uuid,
    pub actor_id: Option<&'a str>,
    pub actor_email: Option<&'a str>,
    pub actor_name: Option<&'a str>,
    pub action: &'static str,
    pub entity_type: &'static str,
    pub entity_id: Uuid,
    pub before_state: Option<&'a JsonValue>,
    pub after_state: Option<&'a JsonValue>,
    pub note: Option<&'a str>,
    pub ip_address: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> AuditRecordInsert<'a> {
    pub fn new(record: &'a AuditRecord) -> Self {
        let actor = record.actor.as_ref();
        Self {
            id: record.id.into_inner(),
            actor_id: actor.map(|a| a.id.as_str()),
            actor_email: actor.and_then(|a| a.email.as_deref()),
            actor_name: actor.and_then(|a| a.name.as_deref()),
            action: record.action.as_str(),
            entity_type: record.target_kind.as_str(),
            entity_id: record.target_id,
            before_state: (!record.before.is_null()).then_some(&record.before),
            after_state: (!record.after.is_null()).then_some(&record.after),
            note: record.note.as_deref(),
            ip_address: record.request.ip_address.as_deref(),
            user_agent: record.request.user_agent.as_deref(),
            created_at: record.created_at,
        }
    }
}
