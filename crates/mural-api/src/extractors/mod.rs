//! Axum extractors for request handling
//!
//! Custom extractors for moderator authentication, request metadata,
//! typed path ids, query strings and validated JSON bodies.

mod auth;
mod path;
mod query;
mod request_meta;
mod validated;

pub use auth::AuthUser;
pub use path::{MuralIdPath, MuralRequestPath};
pub use query::QueryParams;
pub use request_meta::ClientMeta;
pub use validated::ValidatedJson;
