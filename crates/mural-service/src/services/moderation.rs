//! Moderation service
//!
//! Public submissions and every moderator-driven transition of murals and
//! their modification requests. State changes are persisted first; cascade
//! rejection and audit writes follow as best-effort cleanup.

use chrono::Utc;
use mural_core::entities::{
    AuditAction, AuditRecord, Decision, ModificationRequest, Mural, MuralState, TargetKind,
};
use mural_core::value_objects::{
    ActionContext, ImageRef, MapLocation, ModificationRequestId, MuralId,
};
use mural_core::DomainError;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::dto::{
    ModificationDecisionResponse, ModificationRequestResponse, MuralResponse,
    SubmitModificationRequest, SubmitMuralRequest,
};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Public submissions
    // ========================================================================

    /// Create a mural awaiting moderation. Not audited.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn submit_mural(&self, request: SubmitMuralRequest) -> ServiceResult<MuralResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Name is required"));
        }
        let location = MapLocation::parse(&request.location)?;
        let image = usable_image(request.image_url, request.thumbnail_url)?;

        let mural = Mural::new(name, location, image)
            .with_comment(request.comment)
            .with_submitter_label(request.submitter_label);
        self.ctx.mural_repo().create(&mural).await?;

        info!(mural_id = %mural.id, "Mural submitted");

        Ok(MuralResponse::from(&mural))
    }

    /// Report a change to an existing mural
    #[instrument(skip(self, request))]
    pub async fn submit_modification_request(
        &self,
        mural_id: MuralId,
        request: SubmitModificationRequest,
    ) -> ServiceResult<ModificationRequestResponse> {
        let image = usable_image(request.image_url, request.thumbnail_url)?;

        let mural = self.find_mural(mural_id).await?;
        mural.ensure_accepts_modification_requests()?;

        let modification = ModificationRequest::new(mural.id, image).with_comment(request.comment);
        // the store re-checks the mural state in the same statement
        self.ctx.request_repo().create(&modification).await?;

        info!(
            mural_id = %mural.id,
            request_id = %modification.id,
            "Modification request submitted"
        );

        Ok(ModificationRequestResponse::from(&modification))
    }

    // ========================================================================
    // Mural decisions
    // ========================================================================

    /// Approve or reject a mural
    #[instrument(skip(self, ctx), fields(actor_id = ctx.actor_id()))]
    pub async fn decide_mural(
        &self,
        mural_id: MuralId,
        decision: Decision,
        ctx: &ActionContext,
    ) -> ServiceResult<MuralResponse> {
        let action = AuditAction::for_mural(decision);
        self.change_mural_state(mural_id, decision.mural_state(), action, ctx)
            .await
    }

    /// Move a mural to an explicit state.
    ///
    /// `approved` and `rejected` behave exactly like [`Self::decide_mural`];
    /// `pending` re-queues the mural. `modification_approved` is reachable only
    /// through an approved modification request.
    #[instrument(skip(self, ctx), fields(actor_id = ctx.actor_id()))]
    pub async fn override_mural_state(
        &self,
        mural_id: MuralId,
        state: MuralState,
        ctx: &ActionContext,
    ) -> ServiceResult<MuralResponse> {
        let action = match state {
            MuralState::Approved => AuditAction::ApproveMural,
            MuralState::Rejected => AuditAction::RejectMural,
            MuralState::Pending | MuralState::ModificationApproved => AuditAction::UpdateState,
        };
        self.change_mural_state(mural_id, state, action, ctx).await
    }

    async fn change_mural_state(
        &self,
        mural_id: MuralId,
        target: MuralState,
        action: AuditAction,
        ctx: &ActionContext,
    ) -> ServiceResult<MuralResponse> {
        let mural = self.find_mural(mural_id).await?;
        mural.ensure_can_move_to(target)?;

        let updated = self
            .ctx
            .mural_repo()
            .transition_state(mural.id, mural.state, target)
            .await?
            .ok_or(DomainError::ConcurrentUpdate)?;

        info!(
            mural_id = %mural.id,
            from = %mural.state,
            to = %updated.state,
            actor_id = ctx.actor_id(),
            "Mural state changed"
        );

        let record = AuditRecord::new(action, TargetKind::Mural, mural.id, ctx)
            .with_before(json!({ "state": mural.state }))
            .with_after(json!({ "state": updated.state }))
            .with_note(mural_note(&mural.name, target));
        AuditService::new(self.ctx).record(record).await;

        Ok(MuralResponse::from(&updated))
    }

    // ========================================================================
    // Modification request decisions
    // ========================================================================

    /// Approve or reject a pending modification request of `mural_id`
    #[instrument(skip(self, ctx), fields(actor_id = ctx.actor_id()))]
    pub async fn decide_modification_request(
        &self,
        mural_id: MuralId,
        request_id: ModificationRequestId,
        decision: Decision,
        ctx: &ActionContext,
    ) -> ServiceResult<ModificationDecisionResponse> {
        let request = self
            .ctx
            .request_repo()
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::ModificationRequestNotFound(request_id))?;
        request.ensure_belongs_to(mural_id)?;
        request.ensure_pending()?;

        match decision {
            Decision::Reject => self.reject_request(request, ctx).await,
            Decision::Approve => self.approve_request(request, ctx).await,
        }
    }

    async fn reject_request(
        &self,
        request: ModificationRequest,
        ctx: &ActionContext,
    ) -> ServiceResult<ModificationDecisionResponse> {
        let rejected = self
            .ctx
            .request_repo()
            .reject(request.id, Utc::now())
            .await?
            .ok_or(DomainError::RequestNotPending)?;

        info!(
            mural_id = %rejected.mural_id,
            request_id = %rejected.id,
            actor_id = ctx.actor_id(),
            "Modification request rejected"
        );

        let record = AuditRecord::new(
            AuditAction::for_modification(Decision::Reject),
            TargetKind::ModificationRequest,
            rejected.id,
            ctx,
        )
        .with_before(json!({ "request_state": request.state, "mural_id": request.mural_id }))
        .with_after(json!({ "request_state": rejected.state, "processed_at": rejected.processed_at }))
        .with_note(format!("Modification rejected for mural {}", rejected.mural_id));
        AuditService::new(self.ctx).record(record).await;

        Ok(ModificationDecisionResponse {
            request: ModificationRequestResponse::from(&rejected),
            mural: None,
            cascade_rejected: Vec::new(),
        })
    }

    async fn approve_request(
        &self,
        request: ModificationRequest,
        ctx: &ActionContext,
    ) -> ServiceResult<ModificationDecisionResponse> {
        let mural = self.find_mural(request.mural_id).await?;
        let processed_at = Utc::now();
        let approval = mural.plan_modification(&request, processed_at)?;

        // mural flip and request approval commit together
        self.ctx.request_repo().approve(&approval).await?;

        let mut updated_mural = mural.clone();
        updated_mural.apply_modification(&approval);
        let mut approved = request.clone();
        approved.approve(&approval);

        info!(
            mural_id = %mural.id,
            request_id = %request.id,
            from = %mural.state,
            to = %updated_mural.state,
            actor_id = ctx.actor_id(),
            "Modification request approved"
        );

        let cascaded = match self
            .ctx
            .request_repo()
            .reject_pending_siblings(mural.id, request.id, processed_at)
            .await
        {
            Ok(ids) => ids,
            Err(err) => {
                error!(
                    error = %err,
                    mural_id = %mural.id,
                    request_id = %request.id,
                    "Cascade rejection failed; pending siblings left for manual cleanup"
                );
                Vec::new()
            }
        };
        if !cascaded.is_empty() {
            info!(
                mural_id = %mural.id,
                count = cascaded.len(),
                "Pending sibling requests rejected"
            );
        }

        let audit = AuditService::new(self.ctx);
        let record = AuditRecord::new(
            AuditAction::for_modification(Decision::Approve),
            TargetKind::ModificationRequest,
            request.id,
            ctx,
        )
        .with_before(json!({
            "request_state": request.state,
            "mural_id": mural.id,
            "mural_state": mural.state,
            "mural_image_url": mural.image.url,
            "mural_thumbnail_url": mural.image.thumbnail_url,
            "mural_comment": mural.comment,
        }))
        .with_after(json!({
            "request_state": approved.state,
            "processed_at": processed_at,
            "mural_state": updated_mural.state,
            "mural_image_url": updated_mural.image.url,
            "mural_thumbnail_url": updated_mural.image.thumbnail_url,
            "mural_comment": updated_mural.comment,
        }))
        .with_note(format!(
            "Modification approved for mural \"{}\"; {} pending request(s) auto-rejected",
            mural.name,
            cascaded.len()
        ));
        audit.record(record).await;

        for sibling in &cascaded {
            let record = AuditRecord::new(
                AuditAction::RejectModification,
                TargetKind::ModificationRequest,
                *sibling,
                ctx,
            )
            .with_before(json!({ "request_state": "pending", "mural_id": mural.id }))
            .with_after(json!({ "request_state": "rejected", "processed_at": processed_at }))
            .with_note(format!(
                "Automatically rejected: request {} was approved for mural {}",
                request.id, mural.id
            ));
            audit.record(record).await;
        }

        Ok(ModificationDecisionResponse {
            request: ModificationRequestResponse::from(&approved),
            mural: Some(MuralResponse::from(&updated_mural)),
            cascade_rejected: cascaded.iter().map(ToString::to_string).collect(),
        })
    }

    async fn find_mural(&self, mural_id: MuralId) -> ServiceResult<Mural> {
        Ok(self
            .ctx
            .mural_repo()
            .find_by_id(mural_id)
            .await?
            .ok_or(DomainError::MuralNotFound(mural_id))?)
    }
}

fn usable_image(url: String, thumbnail_url: Option<String>) -> Result<ImageRef, DomainError> {
    let image = ImageRef::from_parts(url.trim(), thumbnail_url);
    if image.is_usable() {
        Ok(image)
    } else {
        Err(DomainError::MissingImage)
    }
}

fn mural_note(name: &str, target: MuralState) -> String {
    match target {
        MuralState::Approved => format!("Mural \"{name}\" approved"),
        MuralState::Rejected => format!("Mural \"{name}\" rejected"),
        MuralState::Pending => format!("Mural \"{name}\" moved back to pending"),
        MuralState::ModificationApproved => format!("Mural \"{name}\" set to {target}"),
    }
}
