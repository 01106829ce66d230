//! Note model for rental-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Free-form landlord note, optionally tied to a flat or tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub note_id: Uuid,
    pub landlord_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub flat_number: Option<String>,
    pub title: String,
    pub content: String,
    pub is_important: bool,
    pub recorded_by: Uuid,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Request payload for creating a note.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    pub tenant_id: Option<Uuid>,
    pub flat_number: Option<String>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(default)]
    pub is_important: bool,
}
