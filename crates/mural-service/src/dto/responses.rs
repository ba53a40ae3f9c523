//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are serialized as UUID strings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset-paginated list
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, limit: i64, offset: i64, has_more: bool) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                limit,
                offset,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Page size used
    pub limit: i64,
    /// Rows skipped
    pub offset: i64,
    /// Whether more rows exist after this page
    pub has_more: bool,
}

// ============================================================================
// Mural Responses
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinatesResponse {
    pub lat: f64,
    pub lng: f64,
}

/// Mural as shown on the map and in the moderation queue
#[derive(Debug, Clone, Serialize)]
pub struct MuralResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_label: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Returned to the public submitter; does not echo the submission back
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub id: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModificationRequestResponse {
    pub id: String,
    pub mural_id: String,
    pub new_image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_comment: Option<String>,
    pub state: String,
    /// Mural image this request replaced (approved requests only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Single mural with the requests the caller may see
#[derive(Debug, Clone, Serialize)]
pub struct MuralDetailResponse {
    #[serde(flatten)]
    pub mural: MuralResponse,
    pub modification_requests: Vec<ModificationRequestResponse>,
}

/// Moderation queue entry
#[derive(Debug, Clone, Serialize)]
pub struct AdminMuralResponse {
    #[serde(flatten)]
    pub mural: MuralResponse,
    pub pending_requests: usize,
    pub modification_requests: Vec<ModificationRequestResponse>,
}

/// Outcome of deciding a modification request
#[derive(Debug, Clone, Serialize)]
pub struct ModificationDecisionResponse {
    pub request: ModificationRequestResponse,
    /// Updated mural (approvals only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mural: Option<MuralResponse>,
    /// Sibling requests rejected by the approval cascade
    pub cascade_rejected: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModerationStatsResponse {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub modification_approved: i64,
    pub with_pending_requests: i64,
}

// ============================================================================
// Audit Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ActorResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditRecordResponse {
    pub id: String,
    pub actor: Option<ActorResponse>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before_state: JsonValue,
    pub after_state: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_response() {
        let response = PaginatedResponse::new(vec![1, 2, 3], 3, 6, true);
        assert_eq!(response.pagination.limit, 3);
        assert_eq!(response.pagination.offset, 6);
        assert!(response.pagination.has_more);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.database, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.database, "unhealthy");
    }

    #[test]
    fn test_stats_serialization() {
        let stats = ModerationStatsResponse {
            total: 3,
            pending: 1,
            approved: 1,
            rejected: 0,
            modification_approved: 1,
            with_pending_requests: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["modification_approved"], 1);
        assert_eq!(json["with_pending_requests"], 0);
    }
}
