//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use mural_core::entities::{AuditRecord, ModificationRequest, Mural};
use mural_core::value_objects::{Actor, Coordinates};

use super::responses::{
    ActorResponse, AuditRecordResponse, CoordinatesResponse, ModificationRequestResponse,
    MuralResponse, SubmissionReceipt,
};

// ============================================================================
// Mural Mappers
// ============================================================================

impl From<Coordinates> for CoordinatesResponse {
    fn from(c: Coordinates) -> Self {
        Self { lat: c.lat, lng: c.lng }
    }
}

impl From<&Mural> for MuralResponse {
    fn from(mural: &Mural) -> Self {
        Self {
            id: mural.id.to_string(),
            name: mural.name.clone(),
            submitter_label: mural.submitter_label.clone(),
            location: mural.location.as_str().to_string(),
            coordinates: mural.location.coordinates().map(CoordinatesResponse::from),
            comment: mural.comment.clone(),
            image_url: mural.image.url.clone(),
            thumbnail_url: mural.image.thumbnail_url.clone(),
            state: mural.state.to_string(),
            created_at: mural.created_at,
            updated_at: mural.updated_at,
        }
    }
}

impl From<Mural> for MuralResponse {
    fn from(mural: Mural) -> Self {
        Self::from(&mural)
    }
}

impl From<&MuralResponse> for SubmissionReceipt {
    fn from(mural: &MuralResponse) -> Self {
        Self {
            id: mural.id.clone(),
            state: mural.state.clone(),
            created_at: mural.created_at,
        }
    }
}

// ============================================================================
// Modification Request Mappers
// ============================================================================

impl From<&ModificationRequest> for ModificationRequestResponse {
    fn from(request: &ModificationRequest) -> Self {
        let original = request.original_image.as_ref();
        Self {
            id: request.id.to_string(),
            mural_id: request.mural_id.to_string(),
            new_image_url: request.new_image.url.clone(),
            new_thumbnail_url: request.new_image.thumbnail_url.clone(),
            new_comment: request.new_comment.clone(),
            state: request.state.to_string(),
            original_image_url: original.map(|i| i.url.clone()),
            original_thumbnail_url: original.and_then(|i| i.thumbnail_url.clone()),
            processed_at: request.processed_at,
            created_at: request.created_at,
        }
    }
}

impl From<ModificationRequest> for ModificationRequestResponse {
    fn from(request: ModificationRequest) -> Self {
        Self::from(&request)
    }
}

// ============================================================================
// Audit Mappers
// ============================================================================

impl From<&Actor> for ActorResponse {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            email: actor.email.clone(),
            name: actor.name.clone(),
        }
    }
}

impl From<AuditRecord> for AuditRecordResponse {
    fn from(record: AuditRecord) -> Self {
        Self {
            id: record.id.to_string(),
            actor: record.actor.as_ref().map(ActorResponse::from),
            action: record.action.to_string(),
            entity_type: record.target_kind.to_string(),
            entity_id: record.target_id.to_string(),
            before_state: record.before,
            after_state: record.after,
            note: record.note,
            ip_address: record.request.ip_address,
            user_agent: record.request.user_agent,
            created_at: record.created_at,
        }
    }
}
