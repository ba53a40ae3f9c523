//! Modification request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for modification_requests table
#[derive(Debug, Clone, FromRow)]
pub struct ModificationRequestModel {
    pub id: Uuid,
    pub mural_id: Uuid,
    pub new_image_url: String,
    pub new_thumbnail_url: Option<String>,
    pub new_comment: Option<String>,
    pub request_state: String,
    pub original_image_url: Option<String>,
    pub original_thumbnail_url: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

