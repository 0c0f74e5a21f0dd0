//! Space entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quill_core::types::{DbId, Timestamp};

/// A space row from the `spaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Space {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new space.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpace {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for adding a member to a space.
#[derive(Debug, Clone, Deserialize)]
pub struct AddSpaceMember {
    pub user_id: DbId,
}
