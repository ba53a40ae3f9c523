//! Moderation handlers
//!
//! Every endpoint here requires a verified moderator token.

use axum::{extract::State, Json};
use mural_service::dto::{
    AdminMuralResponse, AdminMuralsParams, AuditListParams, AuditRecordResponse, DecisionRequest,
    ModerationStatsResponse, ModificationDecisionResponse, MuralResponse, OverrideStateRequest,
    PaginatedResponse,
};
use mural_service::{AdminMuralFilter, AuditService, ModerationService, QueryService};

use crate::extractors::{
    AuthUser, ClientMeta, MuralIdPath, MuralRequestPath, QueryParams, ValidatedJson,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Moderation queue
///
/// GET /admin/murals?filter=all|pending|modification_pending
pub async fn list_murals(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(params): QueryParams<AdminMuralsParams>,
) -> ApiResult<Json<Vec<AdminMuralResponse>>> {
    let filter: AdminMuralFilter = params.filter.as_deref().unwrap_or_default().parse()?;
    let murals = QueryService::new(state.service_context())
        .list_admin(filter)
        .await?;
    Ok(Json(murals))
}

/// Dashboard counters
///
/// GET /admin/stats
pub async fn stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<ModerationStatsResponse>> {
    let stats = QueryService::new(state.service_context()).stats().await?;
    Ok(Json(stats))
}

/// Approve or reject a mural
///
/// PATCH /admin/murals/{mural_id}
pub async fn decide_mural(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientMeta(meta): ClientMeta,
    MuralIdPath(mural_id): MuralIdPath,
    ValidatedJson(request): ValidatedJson<DecisionRequest>,
) -> ApiResult<Json<MuralResponse>> {
    let decision = request.decision()?;
    let ctx = auth.action_context(meta);

    let mural = ModerationService::new(state.service_context())
        .decide_mural(mural_id, decision, &ctx)
        .await?;
    Ok(Json(mural))
}

/// Move a mural to an explicit state
///
/// PUT /admin/murals/{mural_id}/state
pub async fn override_mural_state(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientMeta(meta): ClientMeta,
    MuralIdPath(mural_id): MuralIdPath,
    ValidatedJson(request): ValidatedJson<OverrideStateRequest>,
) -> ApiResult<Json<MuralResponse>> {
    let target = request.state()?;
    let ctx = auth.action_context(meta);

    let mural = ModerationService::new(state.service_context())
        .override_mural_state(mural_id, target, &ctx)
        .await?;
    Ok(Json(mural))
}

/// Approve or reject a modification request
///
/// PATCH /admin/murals/{mural_id}/modification-requests/{request_id}
pub async fn decide_modification_request(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientMeta(meta): ClientMeta,
    path: MuralRequestPath,
    ValidatedJson(request): ValidatedJson<DecisionRequest>,
) -> ApiResult<Json<ModificationDecisionResponse>> {
    let decision = request.decision()?;
    let ctx = auth.action_context(meta);

    let outcome = ModerationService::new(state.service_context())
        .decide_modification_request(path.mural_id, path.request_id, decision, &ctx)
        .await?;
    Ok(Json(outcome))
}

/// Audit trail, newest first
///
/// GET /admin/audit?entity_id=&entity_kind=&limit=&offset=
pub async fn list_audit(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(params): QueryParams<AuditListParams>,
) -> ApiResult<Json<PaginatedResponse<AuditRecordResponse>>> {
    let page = AuditService::new(state.service_context())
        .list(params)
        .await?;
    Ok(Json(page))
}
