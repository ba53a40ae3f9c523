//! Query service
//!
//! Read-only projections for the public map and the moderation queue.
//! Public visibility is decided here, never by hiding rows in storage.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use mural_core::entities::{ModificationRequest, MuralState, RequestState};
use mural_core::value_objects::MuralId;
use mural_core::DomainError;
use tracing::instrument;

use crate::dto::{
    AdminMuralResponse, ModerationStatsResponse, ModificationRequestResponse,
    MuralDetailResponse, MuralResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Which murals the moderation queue shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminMuralFilter {
    #[default]
    All,
    /// Murals awaiting their first decision
    Pending,
    /// Murals with at least one pending modification request
    ModificationPending,
}

impl AdminMuralFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::ModificationPending => "modification_pending",
        }
    }
}

impl fmt::Display for AdminMuralFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminMuralFilter {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "modification_pending" => Ok(Self::ModificationPending),
            other => Err(ServiceError::validation(format!(
                "unknown filter '{other}': expected all, pending or modification_pending"
            ))),
        }
    }
}

/// Query service
pub struct QueryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QueryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Murals shown on the public map, newest first
    #[instrument(skip(self))]
    pub async fn list_public(&self) -> ServiceResult<Vec<MuralResponse>> {
        let murals = self.ctx.mural_repo().list(Some(&MuralState::PUBLIC)).await?;
        Ok(murals.iter().map(MuralResponse::from).collect())
    }

    /// One mural by id.
    ///
    /// Pending murals are visible for the submitter's preview link; rejected
    /// ones are reported as missing. Requests are included only for public
    /// murals, and only the approved one.
    #[instrument(skip(self))]
    pub async fn get_mural(&self, mural_id: MuralId) -> ServiceResult<MuralDetailResponse> {
        let mural = self
            .ctx
            .mural_repo()
            .find_by_id(mural_id)
            .await?
            .filter(|m| m.is_visible_by_id())
            .ok_or(DomainError::MuralNotFound(mural_id))?;

        let modification_requests = if mural.is_public() {
            self.ctx
                .request_repo()
                .list_by_mural(mural.id)
                .await?
                .iter()
                .filter(|r| r.state == RequestState::Approved)
                .map(ModificationRequestResponse::from)
                .collect()
        } else {
            Vec::new()
        };

        Ok(MuralDetailResponse {
            mural: MuralResponse::from(&mural),
            modification_requests,
        })
    }

    /// Moderation queue: murals newest first with all of their requests
    #[instrument(skip(self))]
    pub async fn list_admin(
        &self,
        filter: AdminMuralFilter,
    ) -> ServiceResult<Vec<AdminMuralResponse>> {
        let murals = match filter {
            AdminMuralFilter::Pending => {
                self.ctx
                    .mural_repo()
                    .list(Some(&[MuralState::Pending]))
                    .await?
            }
            AdminMuralFilter::All | AdminMuralFilter::ModificationPending => {
                self.ctx.mural_repo().list(None).await?
            }
        };

        let ids: Vec<MuralId> = murals.iter().map(|m| m.id).collect();
        let mut by_mural: HashMap<MuralId, Vec<ModificationRequest>> = HashMap::new();
        for request in self.ctx.request_repo().list_by_murals(&ids).await? {
            by_mural.entry(request.mural_id).or_default().push(request);
        }

        Ok(murals
            .iter()
            .filter_map(|mural| {
                let requests = by_mural.remove(&mural.id).unwrap_or_default();
                let pending_requests = requests.iter().filter(|r| r.is_pending()).count();
                if filter == AdminMuralFilter::ModificationPending && pending_requests == 0 {
                    return None;
                }
                Some(AdminMuralResponse {
                    mural: MuralResponse::from(mural),
                    pending_requests,
                    modification_requests: requests
                        .iter()
                        .map(ModificationRequestResponse::from)
                        .collect(),
                })
            })
            .collect())
    }

    /// Counts per mural state plus murals with pending requests
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<ModerationStatsResponse> {
        let mut stats = ModerationStatsResponse::default();
        for (state, count) in self.ctx.mural_repo().count_by_state().await? {
            stats.total += count;
            match state {
                MuralState::Pending => stats.pending = count,
                MuralState::Approved => stats.approved = count,
                MuralState::Rejected => stats.rejected = count,
                MuralState::ModificationApproved => stats.modification_approved = count,
            }
        }
        stats.with_pending_requests = self.ctx.request_repo().count_murals_with_pending().await?;
        Ok(stats)
    }
}
