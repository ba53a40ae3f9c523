//! Public mural handlers
//!
//! The map, mural detail, and anonymous submissions.

use axum::{extract::State, Json};
use mural_service::dto::{
    ModificationRequestResponse, MuralDetailResponse, MuralResponse, SubmissionReceipt,
    SubmitModificationRequest, SubmitMuralRequest,
};
use mural_service::{ModerationService, QueryService};

use crate::extractors::{MuralIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Murals shown on the public map
///
/// GET /murals
pub async fn list_murals(State(state): State<AppState>) -> ApiResult<Json<Vec<MuralResponse>>> {
    let murals = QueryService::new(state.service_context()).list_public().await?;
    Ok(Json(murals))
}

/// Submit a new mural for moderation
///
/// POST /murals
pub async fn submit_mural(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitMuralRequest>,
) -> ApiResult<Created<Json<SubmissionReceipt>>> {
    let mural = ModerationService::new(state.service_context())
        .submit_mural(request)
        .await?;
    Ok(Created(Json(SubmissionReceipt::from(&mural))))
}

/// Get a mural with its approved modification
///
/// GET /murals/{mural_id}
pub async fn get_mural(
    State(state): State<AppState>,
    MuralIdPath(mural_id): MuralIdPath,
) -> ApiResult<Json<MuralDetailResponse>> {
    let mural = QueryService::new(state.service_context())
        .get_mural(mural_id)
        .await?;
    Ok(Json(mural))
}

/// Report that a mural changed
///
/// POST /murals/{mural_id}/modification-requests
pub async fn submit_modification_request(
    State(state): State<AppState>,
    MuralIdPath(mural_id): MuralIdPath,
    ValidatedJson(request): ValidatedJson<SubmitModificationRequest>,
) -> ApiResult<Created<Json<ModificationRequestResponse>>> {
    let created = ModerationService::new(state.service_context())
        .submit_modification_request(mural_id, request)
        .await?;
    Ok(Created(Json(created)))
}
