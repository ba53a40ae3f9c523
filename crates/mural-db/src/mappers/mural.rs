//! Mural entity <-> model mapper

use mural_core::entities::{Mural, MuralState};
use mural_core::error::DomainError;
use mural_core::value_objects::{ImageRef, MapLocation, MuralId};
use uuid::Uuid;

use super::corrupt_row;
use crate::models::{MuralModel, StateCountModel};

impl TryFrom<MuralModel> for Mural {
    type Error = DomainError;

    fn try_from(model: MuralModel) -> Result<Self, Self::Error> {
        let state = model
            .state
            .parse::<MuralState>()
            .map_err(|e| corrupt_row("murals", e))?;

        Ok(Mural {
            id: MuralId::from_uuid(model.id),
            name: model.name,
            submitter_label: model.submitter_label,
            location: MapLocation::from_stored(model.location_url),
            comment: model.comment,
            image: ImageRef::from_parts(model.image_url, model.thumbnail_url),
            state,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Values for inserting a new mural row
pub struct MuralInsert<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub submitter_label: Option<&'a str>,
    pub location_url: &'a str,
    pub comment: Option<&'a str>,
    pub image_url: &'a str,
    pub thumbnail_url: Option<&'a str>,
    pub state: &'static str,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> MuralInsert<'a> {
    pub fn new(mural: &'a Mural) -> Self {
        Self {
            id: mural.id.into_inner(),
            name: &mural.name,
            submitter_label: mural.submitter_label.as_deref(),
            location_url: mural.location.as_str(),
            comment: mural.comment.as_deref(),
            image_url: &mural.image.url,
            thumbnail_url: mural.image.thumbnail_url.as_deref(),
            state: mural.state.as_str(),
            created_at: mural.created_at,
        }
    }
}

/// Convert grouped count rows, rejecting unknown states
pub fn state_counts(rows: Vec<StateCountModel>) -> Result<Vec<(MuralState, i64)>, DomainError> {
    rows.into_iter()
        .map(|row| {
            row.state
                .parse::<MuralState>()
                .map(|state| (state, row.count))
                .map_err(|e| corrupt_row("murals", e))
        })
        .collect()
}
