//! Audit record database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for audit_records table
#[derive(Debug, Clone, FromRow)]
pub struct AuditRecordModel {
    pub id: Uuid,
    pub actor_id: Option<String>,
    pub actor_email: Option<String>,
    pub actor_name: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    /// Snapshot before the transition
    pub before_state: Option<JsonValue>,
    /// Snapshot after the transition
    pub after_state: Option<JsonValue>,
    pub note: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}
