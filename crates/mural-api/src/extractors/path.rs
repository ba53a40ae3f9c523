//! Path parameter extractors
//!
//! Type-safe extraction of mural and request ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mural_core::{ModificationRequestId, MuralId};
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct RawMuralPath {
    mural_id: String,
}

#[derive(Debug, Deserialize)]
struct RawMuralRequestPath {
    mural_id: String,
    request_id: String,
}

/// `/murals/:mural_id`
#[derive(Debug, Clone, Copy)]
pub struct MuralIdPath(pub MuralId);

/// `/murals/:mural_id/modification-requests/:request_id`
#[derive(Debug, Clone, Copy)]
pub struct MuralRequestPath {
    pub mural_id: MuralId,
    pub request_id: ModificationRequestId,
}

fn parse_mural_id(raw: &str) -> Result<MuralId, ApiError> {
    MuralId::parse(raw).map_err(|_| ApiError::invalid_path("Invalid mural_id format"))
}

#[async_trait]
impl<S> FromRequestParts<S> for MuralIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawMuralPath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(Self(parse_mural_id(&raw.mural_id)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MuralRequestPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawMuralRequestPath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(Self {
            mural_id: parse_mural_id(&raw.mural_id)?,
            request_id: ModificationRequestId::parse(&raw.request_id)
                .map_err(|_| ApiError::invalid_path("Invalid request_id format"))?,
        })
    }
}
