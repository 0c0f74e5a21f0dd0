//! Page version model.
//!
//! Versions are immutable snapshots: one row per (page, version), created on
//! page creation, every content edit, and every revert. Rows are never
//! updated after insert except for the `is_latest` flip when a newer version
//! lands.

use serde::Serialize;
use sqlx::FromRow;

use quill_core::types::{DbId, Timestamp};

/// A row from the `page_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageVersion {
    pub id: DbId,
    pub page_id: DbId,
    pub version: i32,
    pub content: String,
    pub is_latest: bool,
    pub edited_by: Option<DbId>,
    pub edit_summary: Option<String>,
    pub edited_at: Timestamp,
}

/// Response for a line diff between two versions of a page.
#[derive(Debug, Serialize)]
pub struct VersionDiff {
    pub page_id: DbId,
    pub v1: i32,
    pub v2: i32,
    pub lines: Vec<DiffLineDto>,
}

/// A single line in a diff response.
#[derive(Debug, Serialize)]
pub struct DiffLineDto {
    pub line_type: String,
    pub content: String,
}
