//! Authentication extractor
//!
//! Verifies the moderator's bearer token from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use mural_core::{ActionContext, Actor, RequestMeta};

use crate::response::ApiError;
use crate::state::AppState;

/// Moderator identified by a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub actor: Actor,
}

impl AuthUser {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }

    /// Context for a moderation action taken by this moderator
    pub fn action_context(self, request: RequestMeta) -> ActionContext {
        ActionContext::new(Some(self.actor), request)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let actor = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected moderator token");
                ApiError::App(e)
            })?;

        Ok(AuthUser::new(actor))
    }
}
