//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`; query-string DTOs convert
//! themselves into domain queries.

use mural_core::{AuditQuery, Decision, DomainError, MuralState, TargetKind};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Public Submissions
// ============================================================================

/// New mural submitted from the public map
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitMuralRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Submitter label must be at most 100 characters"))]
    pub submitter_label: Option<String>,

    /// Link to the mural on the external map provider
    #[validate(length(min = 1, max = 2048, message = "Location is required"))]
    pub location: String,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,

    #[validate(length(min = 1, max = 2048, message = "Image is required"))]
    pub image_url: String,

    #[validate(length(max = 2048))]
    pub thumbnail_url: Option<String>,
}

/// "This mural changed" report carrying a new photo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitModificationRequest {
    #[validate(length(min = 1, max = 2048, message = "Image is required"))]
    pub image_url: String,

    #[validate(length(max = 2048))]
    pub thumbnail_url: Option<String>,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

// ============================================================================
// Moderation
// ============================================================================

/// `{ "decision": "approve" | "reject" }`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DecisionRequest {
    #[validate(length(min = 1, message = "Decision is required"))]
    pub decision: String,
}

impl DecisionRequest {
    pub fn decision(&self) -> Result<Decision, DomainError> {
        self.decision.parse()
    }
}

/// Manual state override
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OverrideStateRequest {
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
}

impl OverrideStateRequest {
    pub fn state(&self) -> Result<MuralState, DomainError> {
        self.state.parse()
    }
}

/// Query string of the admin mural listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminMuralsParams {
    pub filter: Option<String>,
}

/// Query string of the audit listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditListParams {
    pub entity_id: Option<String>,
    pub entity_kind: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl AuditListParams {
    /// Convert into a clamped audit query
    pub fn into_query(self, default_limit: i64, max_limit: i64) -> Result<AuditQuery, DomainError> {
        let target_id = match self.entity_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
                DomainError::ValidationError(format!("entity_id '{raw}' is not a valid id"))
            })?),
        };
        let target_kind = match self.entity_kind.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<TargetKind>()?),
        };

        Ok(AuditQuery {
            target_id,
            target_kind,
            limit: self.limit.unwrap_or(default_limit),
            offset: self.offset.unwrap_or(0),
        }
        .normalized(max_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mural_request() -> SubmitMuralRequest {
        SubmitMuralRequest {
            name: "Wall of Colors".to_string(),
            submitter_label: None,
            location: "https://maps.app.goo.gl/abc".to_string(),
            comment: None,
            image_url: "https://img.example/1.jpg".to_string(),
            thumbnail_url: None,
        }
    }

    #[test]
    fn test_submit_mural_validation() {
        assert!(mural_request().validate().is_ok());

        let mut request = mural_request();
        request.name = String::new();
        assert!(request.validate().is_err());

        let mut request = mural_request();
        request.image_url = String::new();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("image_url"));
    }

    #[test]
    fn test_submit_modification_validation() {
        let request = SubmitModificationRequest {
            image_url: String::new(),
            thumbnail_url: None,
            comment: Some("repainted".into()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_decision_parsing() {
        let ok = DecisionRequest { decision: "approve".into() };
        assert_eq!(ok.decision().unwrap(), Decision::Approve);

        let bad = DecisionRequest { decision: "maybe".into() };
        assert!(matches!(bad.decision(), Err(DomainError::InvalidDecision(_))));
    }

    #[test]
    fn test_override_state_parsing() {
        let request = OverrideStateRequest { state: "modification_approved".into() };
        assert_eq!(request.state().unwrap(), MuralState::ModificationApproved);

        let request = OverrideStateRequest { state: "modification_pending".into() };
        assert!(request.state().is_err());
    }

    #[test]
    fn test_audit_params_defaults_and_clamp() {
        let query = AuditListParams::default().into_query(100, 500).unwrap();
        assert_eq!(query.limit, 100);
        assert_eq!(query.offset, 0);
        assert!(query.target_id.is_none());

        let query = AuditListParams {
            limit: Some(10_000),
            offset: Some(-5),
            ..AuditListParams::default()
        }
        .into_query(100, 500)
        .unwrap();
        assert_eq!(query.limit, 500);
        assert_eq!(query.offset, 0);

        let query = AuditListParams {
            limit: Some(0),
            ..AuditListParams::default()
        }
        .into_query(100, 500)
        .unwrap();
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn test_audit_params_filters() {
        let id = Uuid::new_v4();
        let query = AuditListParams {
            entity_id: Some(id.to_string()),
            entity_kind: Some("modification_request".into()),
            ..AuditListParams::default()
        }
        .into_query(100, 500)
        .unwrap();
        assert_eq!(query.target_id, Some(id));
        assert_eq!(query.target_kind, Some(TargetKind::ModificationRequest));

        let err = AuditListParams {
            entity_id: Some("not-a-uuid".into()),
            ..AuditListParams::default()
        }
        .into_query(100, 500)
        .unwrap_err();
        assert!(err.is_validation());

        let err = AuditListParams {
            entity_kind: Some("user".into()),
            ..AuditListParams::default()
        }
        .into_query(100, 500)
        .unwrap_err();
        assert!(err.is_validation());
    }
}
