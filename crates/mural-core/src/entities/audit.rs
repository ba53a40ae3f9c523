//! Audit record entity - append-only trail of moderation transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::mural::Decision;
use crate::error::DomainError;
use crate::value_objects::{ActionContext, Actor, AuditRecordId, RequestMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ApproveMural,
    RejectMural,
    ApproveModification,
    RejectModification,
    /// Manual state override that is neither a plain approve nor reject
    UpdateState,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApproveMural => "approve_mural",
            Self::RejectMural => "reject_mural",
            Self::ApproveModification => "approve_modification",
            Self::RejectModification => "reject_modification",
            Self::UpdateState => "update_state",
        }
    }

    pub fn for_mural(decision: Decision) -> Self {
        match decision {
            Decision::Approve => Self::ApproveMural,
            Decision::Reject => Self::RejectMural,
        }
    }

    pub fn for_modification(decision: Decision) -> Self {
        match decision {
            Decision::Approve => Self::ApproveModification,
            Decision::Reject => Self::RejectModification,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve_mural" => Ok(Self::ApproveMural),
            "reject_mural" => Ok(Self::RejectMural),
            "approve_modification" => Ok(Self::ApproveModification),
            "reject_modification" => Ok(Self::RejectModification),
            "update_state" => Ok(Self::UpdateState),
            other => Err(DomainError::ValidationError(format!(
                "unknown audit action '{other}'"
            ))),
        }
    }
}

/// Kind of entity an audit record points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Mural,
    ModificationRequest,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mural => "mural",
            Self::ModificationRequest => "modification_request",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mural" => Ok(Self::Mural),
            "modification_request" => Ok(Self::ModificationRequest),
            other => Err(DomainError::ValidationError(format!(
                "unknown entity kind '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub id: AuditRecordId,
    pub actor: Option<Actor>,
    pub action: AuditAction,
    pub target_kind: TargetKind,
    pub target_id: Uuid,
    pub before: Value,
    pub after: Value,
    pub note: Option<String>,
    pub request: RequestMeta,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        action: AuditAction,
        target_kind: TargetKind,
        target_id: impl Into<Uuid>,
        ctx: &ActionContext,
    ) -> Self {
        Self {
            id: AuditRecordId::new(),
            actor: ctx.actor.clone(),
            action,
            target_kind,
            target_id: target_id.into(),
            before: Value::Null,
            after: Value::Null,
            note: None,
            request: ctx.request.clone(),
            created_at: Utc::now(),
        }
    }

    pub fn with_before(mut self, before: Value) -> Self {
        self.before = before;
        self
    }

    pub fn with_after(mut self, after: Value) -> Self {
        self.after = after;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Filter for listing the audit trail (newest first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditQuery {
    pub target_id: Option<Uuid>,
    pub target_kind: Option<TargetKind>,
    pub limit: i64,
    pub offset: i64,
}

impl AuditQuery {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 500;

    /// Clamp paging values into range
    pub fn normalized(mut self, max_limit: i64) -> Self {
        self.limit = self.limit.clamp(1, max_limit.max(1));
        self.offset = self.offset.max(0);
        self
    }
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            target_id: None,
            target_kind: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
