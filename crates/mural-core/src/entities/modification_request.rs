//! Modification request entity - a reported change to an existing mural
//!
//! A request is created `pending` and ends `approved` or `rejected`. At most
//! one request per mural is ever approved; approving it rejects every other
//! pending sibling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{ImageRef, ModificationRequestId, MuralId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Pending,
    Approved,
    Rejected,
}

impl RequestState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvalidState(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModificationRequest {
    pub id: ModificationRequestId,
    pub mural_id: MuralId,
    pub new_image: ImageRef,
    pub new_comment: Option<String>,
    pub state: RequestState,
    /// Mural image as it was right before this request was approved
    pub original_image: Option<ImageRef>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ModificationRequest {
    pub fn new(mural_id: MuralId, new_image: ImageRef) -> Self {
        Self {
            id: ModificationRequestId::new(),
            mural_id,
            new_image,
            new_comment: None,
            state: RequestState::Pending,
            original_image: None,
            processed_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.new_comment = comment.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn is_pending(&self) -> bool {
        self.state == RequestState::Pending
    }

    pub fn ensure_pending(&self) -> Result<(), DomainError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(DomainError::RequestNotPending)
        }
    }

    /// A request addressed through the wrong mural is treated as missing
    pub fn ensure_belongs_to(&self, mural_id: MuralId) -> Result<(), DomainError> {
        if self.mural_id == mural_id {
            Ok(())
        } else {
            Err(DomainError::ModificationRequestNotFound(self.id))
        }
    }

    /// Mark rejected. Returns false (and changes nothing) if already terminal.
    pub fn reject(&mut self, processed_at: DateTime<Utc>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = RequestState::Rejected;
        self.processed_at = Some(processed_at);
        true
    }

    /// Mark approved, keeping the snapshot of the image it replaced
    pub fn approve(&mut self, approval: &ModificationApproval) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = RequestState::Approved;
        self.original_image = Some(approval.original_image.clone());
        self.processed_at = Some(approval.processed_at);
        true
    }
}

/// Everything that must be persisted atomically when a request is approved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModificationApproval {
    pub mural_id: MuralId,
    pub request_id: ModificationRequestId,
    /// New live image of the mural
    pub image: ImageRef,
    /// Resulting mural comment
    pub comment: Option<String>,
    pub original_image: ImageRef,
    pub processed_at: DateTime<Utc>,
}
