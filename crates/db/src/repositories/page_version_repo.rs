//! Read side of the page version ledger (`page_versions` table).
//!
//! Versions are written only through the transactional operations on
//! [`PageRepo`](crate::repositories::PageRepo), which serialize appends per
//! page. Everything here is read-only and restartable.

use sqlx::PgPool;

use quill_core::types::DbId;

use crate::models::page_version::PageVersion;

/// Column list for page_versions queries.
pub(crate) const COLUMNS: &str =
    "id, page_id, version, content, is_latest, edited_by, edit_summary, edited_at";

/// Provides read operations over page version history.
pub struct PageVersionRepo;

impl PageVersionRepo {
    /// List all versions for a page, newest first.
    pub async fn list_by_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<PageVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_versions
             WHERE page_id = $1
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, PageVersion>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Find a specific version of a page.
    pub async fn find_by_page_and_version(
        pool: &PgPool,
        page_id: DbId,
        version: i32,
    ) -> Result<Option<PageVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_versions
             WHERE page_id = $1 AND version = $2"
        );
        sqlx::query_as::<_, PageVersion>(&query)
            .bind(page_id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    /// Find the version currently marked latest for a page.
    pub async fn find_latest(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Option<PageVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_versions
             WHERE page_id = $1 AND is_latest"
        );
        sqlx::query_as::<_, PageVersion>(&query)
            .bind(page_id)
            .fetch_optional(pool)
            .await
    }

    /// Count the versions stored for a page.
    pub async fn count_for_page(pool: &PgPool, page_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM page_versions WHERE page_id = $1")
                .bind(page_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
