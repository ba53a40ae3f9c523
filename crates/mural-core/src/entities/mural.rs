//! Mural entity - a physical artwork pinned on the public map
//!
//! Lifecycle:
//! - `pending` → `approved` | `rejected` (moderator decision)
//! - `approved` | `rejected` → `modification_approved` (only by approving a
//!   modification request, never directly)
//! - `modification_approved` is final: no new requests, no further decisions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::modification_request::{ModificationApproval, ModificationRequest};
use crate::error::DomainError;
use crate::value_objects::{ImageRef, MapLocation, MuralId};

// ============================================================================
// Mural State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuralState {
    Pending,
    Approved,
    Rejected,
    ModificationApproved,
}

impl MuralState {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::ModificationApproved,
    ];

    /// States visible on the public map
    pub const PUBLIC: [Self; 2] = [Self::Approved, Self::ModificationApproved];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::ModificationApproved => "modification_approved",
        }
    }

    pub fn is_public(self) -> bool {
        Self::PUBLIC.contains(&self)
    }

    /// Whether new modification requests may be filed against a mural in this state
    pub fn accepts_modification_requests(self) -> bool {
        self != Self::ModificationApproved
    }
}

impl fmt::Display for MuralState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuralState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "modification_approved" => Ok(Self::ModificationApproved),
            other => Err(DomainError::InvalidState(other.to_string())),
        }
    }
}

// ============================================================================
// Decision
// ============================================================================

/// A moderator verdict on a mural or a modification request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    /// Mural state a plain mural decision leads to
    pub fn mural_state(self) -> MuralState {
        match self {
            Self::Approve => MuralState::Approved,
            Self::Reject => MuralState::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(DomainError::InvalidDecision(other.to_string())),
        }
    }
}

// ============================================================================
// Mural
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Mural {
    pub id: MuralId,
    pub name: String,
    pub submitter_label: Option<String>,
    pub location: MapLocation,
    pub comment: Option<String>,
    pub image: ImageRef,
    pub state: MuralState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mural {
    /// Create a new mural awaiting moderation
    pub fn new(name: impl Into<String>, location: MapLocation, image: ImageRef) -> Self {
        let now = Utc::now();
        Self {
            id: MuralId::new(),
            name: name.into(),
            submitter_label: None,
            location,
            comment: None,
            image,
            state: MuralState::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = non_blank(comment);
        self
    }

    pub fn with_submitter_label(mut self, label: Option<String>) -> Self {
        self.submitter_label = non_blank(label);
        self
    }

    pub fn is_public(&self) -> bool {
        self.state.is_public()
    }

    /// Visible when fetched directly by id (public, or a fresh submission preview)
    pub fn is_visible_by_id(&self) -> bool {
        self.is_public() || self.state == MuralState::Pending
    }

    pub fn ensure_accepts_modification_requests(&self) -> Result<(), DomainError> {
        if self.state.accepts_modification_requests() {
            Ok(())
        } else {
            Err(DomainError::MuralAlreadyModified(self.id))
        }
    }

    /// Check that a direct state change to `target` is allowed.
    ///
    /// Re-applying the current state is permitted (overwrite).
    pub fn ensure_can_move_to(&self, target: MuralState) -> Result<(), DomainError> {
        if target == MuralState::ModificationApproved {
            return Err(DomainError::InvalidTransition(
                "a mural becomes modification_approved only by approving a modification request"
                    .to_string(),
            ));
        }
        self.ensure_accepts_modification_requests()
    }

    /// Compute the result of approving `request` against this mural.
    ///
    /// The request must already be known to be pending and owned by this mural.
    pub fn plan_modification(
        &self,
        request: &ModificationRequest,
        processed_at: DateTime<Utc>,
    ) -> Result<ModificationApproval, DomainError> {
        self.ensure_accepts_modification_requests()?;
        if !request.new_image.is_usable() {
            return Err(DomainError::MissingImage);
        }

        let image = ImageRef {
            url: request.new_image.url.clone(),
            thumbnail_url: request
                .new_image
                .thumbnail_url
                .clone()
                .or_else(|| self.image.thumbnail_url.clone()),
        };
        let comment = non_blank(request.new_comment.clone()).or_else(|| self.comment.clone());

        Ok(ModificationApproval {
            mural_id: self.id,
            request_id: request.id,
            image,
            comment,
            original_image: self.image.clone(),
            processed_at,
        })
    }

    /// Apply a planned approval to this in-memory copy
    pub fn apply_modification(&mut self, approval: &ModificationApproval) {
        self.image = approval.image.clone();
        self.comment = approval.comment.clone();
        self.state = MuralState::ModificationApproved;
        self.updated_at = approval.processed_at;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> MapLocation {
        MapLocation::parse("https://www.google.com/maps?q=-34.6,-58.4").unwrap()
    }

    fn mural() -> Mural {
        Mural::new(
            "Wall of Colors",
            location(),
            ImageRef::new("https://img/old.jpg").with_thumbnail("https://img/old_t.jpg"),
        )
        .with_comment(Some("by the river".to_string()))
    }

    #[test]
    fn test_new_mural_is_pending() {
        let m = mural();
        assert_eq!(m.state, MuralState::Pending);
        assert!(!m.is_public());
        assert!(m.is_visible_by_id());
    }

    #[test]
    fn test_blank_optional_fields_dropped() {
        let m = Mural::new("x", location(), ImageRef::new("https://img/a.jpg"))
            .with_comment(Some("  ".to_string()))
            .with_submitter_label(Some(String::new()));
        assert_eq!(m.comment, None);
        assert_eq!(m.submitter_label, None);
    }

    #[test]
    fn test_state_parse_and_display() {
        for state in MuralState::ALL {
            assert_eq!(state.as_str().parse::<MuralState>().unwrap(), state);
        }
        assert!("modification_pending".parse::<MuralState>().is_err());
    }

    #[test]
    fn test_public_states() {
        assert!(MuralState::Approved.is_public());
        assert!(MuralState::ModificationApproved.is_public());
        assert!(!MuralState::Pending.is_public());
        assert!(!MuralState::Rejected.is_public());
    }

    #[test]
    fn test_rejected_mural_hidden_by_id() {
        let mut m = mural();
        m.state = MuralState::Rejected;
        assert!(!m.is_visible_by_id());
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!("approve".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!("reject".parse::<Decision>().unwrap(), Decision::Reject);
        let err = "approved".parse::<Decision>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_cannot_move_directly_to_modification_approved() {
        let m = mural();
        let err = m.ensure_can_move_to(MuralState::ModificationApproved).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_modification_approved_is_final() {
        let mut m = mural();
        m.state = MuralState::ModificationApproved;
        assert!(m.ensure_can_move_to(MuralState::Rejected).unwrap_err().is_conflict());
        assert!(m.ensure_accepts_modification_requests().unwrap_err().is_conflict());
    }

    #[test]
    fn test_plan_modification_replaces_image_and_keeps_old_thumbnail() {
        let mut m = mural();
        m.state = MuralState::Approved;
        let request = ModificationRequest::new(m.id, ImageRef::new("https://img/new.jpg"));

        let approval = m.plan_modification(&request, Utc::now()).unwrap();
        assert_eq!(approval.image.url, "https://img/new.jpg");
        assert_eq!(approval.image.thumbnail_url.as_deref(), Some("https://img/old_t.jpg"));
        assert_eq!(approval.comment.as_deref(), Some("by the river"));
        assert_eq!(approval.original_image, m.image);
    }

    #[test]
    fn test_plan_modification_uses_new_thumbnail_and_comment() {
        let mut m = mural();
        m.state = MuralState::Approved;
        let request = ModificationRequest::new(
            m.id,
            ImageRef::new("https://img/new.jpg").with_thumbnail("https://img/new_t.jpg"),
        )
        .with_comment(Some("repainted in 2024".to_string()));

        let approval = m.plan_modification(&request, Utc::now()).unwrap();
        m.apply_modification(&approval);

        assert_eq!(m.state, MuralState::ModificationApproved);
        assert_eq!(m.image.thumbnail_url.as_deref(), Some("https://img/new_t.jpg"));
        assert_eq!(m.comment.as_deref(), Some("repainted in 2024"));
    }

    #[test]
    fn test_plan_modification_requires_image() {
        let mut m = mural();
        m.state = MuralState::Approved;
        let request = ModificationRequest::new(m.id, ImageRef::new(" "));
        assert!(matches!(
            m.plan_modification(&request, Utc::now()),
            Err(DomainError::MissingImage)
        ));
    }
}
