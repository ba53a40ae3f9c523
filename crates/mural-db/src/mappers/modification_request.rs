//! ModificationRequest entity <-> model mapper

use mural_core::entities::{ModificationRequest, RequestState};
use mural_core::error::DomainError;
use mural_core::value_objects::{ImageRef, ModificationRequestId, MuralId};
use uuid::Uuid;

use super::corrupt_row;
use crate::models::ModificationRequestModel;

impl TryFrom<ModificationRequestModel> for ModificationRequest {
    type Error = DomainError;

    fn try_from(model: ModificationRequestModel) -> Result<Self, Self::Error> {
        let state = model
            .request_state
            .parse::<RequestState>()
            .map_err(|e| corrupt_row("modification_requests", e))?;

        Ok(ModificationRequest {
            id: ModificationRequestId::from_uuid(model.id),
            mural_id: MuralId::from_uuid(model.mural_id),
            new_image: ImageRef::from_parts(model.new_image_url, model.new_thumbnail_url),
            new_comment: model.new_comment,
            state,
            original_image: model
                .original_image_url
                .map(|url| ImageRef::from_parts(url, model.original_thumbnail_url)),
            processed_at: model.processed_at,
            created_at: model.created_at,
        })
    }
}

/// Values for inserting a new request row
pub struct ModificationRequestInsert<'a> {
    pub id: Uuid,
    pub mural_id: Uuid,
    pub new_image_url: &'a str,
    pub new_thumbnail_url: Option<&'a str>,
    pub new_comment: Option<&'a str>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> ModificationRequestInsert<'a> {
    pub fn new(request: &'a ModificationRequest) -> Self {
        Self {
            id: request.id.into_inner(),
            mural_id: request.mural_id.into_inner(),
            new_image_url: &request.new_image.url,
            new_thumbnail_url: request.new_image.thumbnail_url.as_deref(),
            new_comment: request.new_comment.as_deref(),
            created_at: request.created_at,
        }
    }
}
