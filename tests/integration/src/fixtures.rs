//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// New mural body
#[derive(Debug, Serialize)]
pub struct SubmitMural {
    pub name: String,
    pub location: String,
    pub comment: Option<String>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
}

impl SubmitMural {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Integration Mural {suffix}"),
            location: "https://www.google.com/maps?q=-31.4201,-64.1888".to_string(),
            comment: Some("seen from the bus stop".to_string()),
            image_url: format!("https://img.example/it-{suffix}.jpg"),
            thumbnail_url: Some(format!("https://img.example/it-{suffix}_t.jpg")),
        }
    }
}

/// Modification request body
#[derive(Debug, Serialize)]
pub struct SubmitModification {
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub comment: Option<String>,
}

impl SubmitModification {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            image_url: format!("https://img.example/change-{suffix}.jpg"),
            thumbnail_url: None,
            comment: Some(format!("repainted ({suffix})")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Decision {
    pub decision: &'static str,
}

impl Decision {
    pub fn approve() -> Self {
        Self { decision: "approve" }
    }

    pub fn reject() -> Self {
        Self { decision: "reject" }
    }
}

#[derive(Debug, Serialize)]
pub struct OverrideState {
    pub state: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct Mural {
    pub id: String,
    pub name: String,
    pub state: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModificationRequest {
    pub id: String,
    pub mural_id: String,
    pub state: String,
    pub original_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModificationDecision {
    pub request: ModificationRequest,
    pub mural: Option<Mural>,
    pub cascade_rejected: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuditPage {
    pub data: Vec<AuditEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before_state: Value,
    pub after_state: Value,
    pub note: Option<String>,
}
