//! Mural database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for murals table
#[derive(Debug, Clone, FromRow)]
pub struct MuralModel {
    pub id: Uuid,
    pub name: String,
    pub submitter_label: Option<String>,
    pub location_url: String,
    pub comment: Option<String>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    /// Lifecycle state stored as text
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of a `GROUP BY state` count
#[derive(Debug, Clone, FromRow)]
pub struct StateCountModel {
    pub state: String,
    pub count: i64,
}
