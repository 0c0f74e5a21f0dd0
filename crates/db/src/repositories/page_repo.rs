//! Repository for the `pages` table and the invariant-bearing operations on
//! the version ledger and the page hierarchy.
//!
//! Every multi-step mutation here runs in a single transaction that locks
//! the target page row (`SELECT ... FOR UPDATE`). That serializes concurrent
//! appends/moves per page and makes a delete racing an in-flight edit show
//! up as "page not found" rather than resurrecting versions on a dead page.
//! The schema backs this up independently: a partial unique index rejects a
//! second `is_latest` row and `(page_id, version)` is unique.

use sqlx::PgPool;

use quill_core::tree::{would_cycle, PageLink};
use quill_core::types::DbId;

use crate::models::page::{CreatePage, Page};
use crate::models::page_version::PageVersion;
use crate::repositories::page_version_repo;

/// Column list for pages queries.
const COLUMNS: &str = "id, space_id, parent_id, title, current_version, total_versions, \
    created_by, last_edited_by, created_at, updated_at";

/// Outcome of a re-parent attempt. The handler layer maps each variant onto
/// the error taxonomy; only `Moved` commits a change.
#[derive(Debug)]
pub enum MoveOutcome {
    Moved(Page),
    PageNotFound,
    ParentNotFound,
    /// The proposed parent lives in a different space.
    CrossSpace,
    /// The proposed parent is the page itself or one of its descendants.
    WouldCycle,
}

/// Provides CRUD, version-ledger, and hierarchy operations for pages.
pub struct PageRepo;

impl PageRepo {
    /// Create a page together with version 1 of its content, atomically.
    ///
    /// If the version insert fails the page insert rolls back with it; a page
    /// without a version never becomes visible.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePage,
        created_by: Option<DbId>,
    ) -> Result<Page, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO pages (space_id, parent_id, title, created_by, last_edited_by)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(input.space_id)
            .bind(input.parent_id)
            .bind(&input.title)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        let version_query = format!(
            "INSERT INTO page_versions (page_id, version, content, is_latest, edited_by, edit_summary)
             VALUES ($1, 1, $2, TRUE, $3, 'Initial version')
             RETURNING {}",
            page_version_repo::COLUMNS
        );
        sqlx::query_as::<_, PageVersion>(&version_query)
            .bind(page.id)
            .bind(&input.content)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(page)
    }

    /// Find a page by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List pages in a space, most recently updated first, with an optional
    /// title substring filter.
    pub async fn list_by_space(
        pool: &PgPool,
        space_id: DbId,
        title_query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages
             WHERE space_id = $1
               AND ($2::TEXT IS NULL OR title ILIKE '%' || $2 || '%')
             ORDER BY updated_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(space_id)
            .bind(title_query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List direct children of a parent (or the space's roots when `parent`
    /// is `None`), ordered by title for deterministic display.
    pub async fn list_children(
        pool: &PgPool,
        space_id: DbId,
        parent: Option<DbId>,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages
             WHERE space_id = $1 AND parent_id IS NOT DISTINCT FROM $2
             ORDER BY title ASC, id ASC"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(space_id)
            .bind(parent)
            .fetch_all(pool)
            .await
    }

    /// Fetch the (id, parent, title) link snapshot for every page in a space,
    /// for tree building and cycle checks.
    pub async fn list_links(pool: &PgPool, space_id: DbId) -> Result<Vec<PageLink>, sqlx::Error> {
        let rows: Vec<(DbId, Option<DbId>, DbId, String)> = sqlx::query_as(
            "SELECT id, parent_id, space_id, title FROM pages WHERE space_id = $1",
        )
        .bind(space_id)
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, parent_id, space_id, title)| PageLink {
                id,
                parent_id,
                space_id,
                title,
            })
            .collect())
    }

    /// Rename a page. Returns `None` if the page does not exist.
    pub async fn update_title(
        pool: &PgPool,
        page_id: DbId,
        title: &str,
        edited_by: Option<DbId>,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET title = $2, last_edited_by = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(page_id)
            .bind(title)
            .bind(edited_by)
            .fetch_optional(pool)
            .await
    }

    /// Append a new version to a page's ledger: flip the previous latest,
    /// insert version `total_versions + 1` marked latest, and bump the
    /// page's counters. The whole sequence holds a row lock on the page, so
    /// concurrent appends to the same page serialize instead of both
    /// claiming the same version number.
    ///
    /// Returns `None` if the page does not exist (including a delete that
    /// won the race), leaving the ledger untouched.
    pub async fn append_version(
        pool: &PgPool,
        page_id: DbId,
        content: &str,
        edited_by: Option<DbId>,
        edit_summary: Option<&str>,
    ) -> Result<Option<(Page, PageVersion)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1 FOR UPDATE");
        let Some(page) = sqlx::query_as::<_, Page>(&lock_query)
            .bind(page_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let next_version = page.total_versions + 1;

        sqlx::query(
            "UPDATE page_versions SET is_latest = FALSE, updated_at = NOW()
             WHERE page_id = $1 AND is_latest",
        )
        .bind(page_id)
        .execute(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO page_versions (page_id, version, content, is_latest, edited_by, edit_summary)
             VALUES ($1, $2, $3, TRUE, $4, $5)
             RETURNING {}",
            page_version_repo::COLUMNS
        );
        let version = sqlx::query_as::<_, PageVersion>(&insert_query)
            .bind(page_id)
            .bind(next_version)
            .bind(content)
            .bind(edited_by)
            .bind(edit_summary)
            .fetch_one(&mut *tx)
            .await?;

        let update_query = format!(
            "UPDATE pages SET current_version = $2, total_versions = $2,
                last_edited_by = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&update_query)
            .bind(page_id)
            .bind(next_version)
            .bind(edited_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((page, version)))
    }

    /// Re-parent a page (`None` promotes it to a root).
    ///
    /// Validation order: page exists, parent exists, parent in the same
    /// space, no cycle. Both the page row and the candidate-parent row are
    /// locked in one statement (row lock order follows id order, so two
    /// moves touching the same pair cannot deadlock). Mutually-cyclic moves
    /// of two different pages therefore serialize, and the cycle walk runs
    /// against a snapshot taken after both locks are held.
    pub async fn set_parent(
        pool: &PgPool,
        page_id: DbId,
        new_parent: Option<DbId>,
        edited_by: Option<DbId>,
    ) -> Result<MoveOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut lock_ids = vec![page_id];
        if let Some(parent_id) = new_parent {
            if parent_id != page_id {
                lock_ids.push(parent_id);
            }
        }
        let lock_query = format!(
            "SELECT {COLUMNS} FROM pages WHERE id = ANY($1) ORDER BY id FOR UPDATE"
        );
        let locked: Vec<Page> = sqlx::query_as(&lock_query)
            .bind(&lock_ids)
            .fetch_all(&mut *tx)
            .await?;

        let Some(page) = locked.iter().find(|p| p.id == page_id).cloned() else {
            return Ok(MoveOutcome::PageNotFound);
        };

        if let Some(parent_id) = new_parent {
            let parent = if parent_id == page_id {
                Some(&page)
            } else {
                locked.iter().find(|p| p.id == parent_id)
            };
            let Some(parent) = parent else {
                return Ok(MoveOutcome::ParentNotFound);
            };
            if parent.space_id != page.space_id {
                return Ok(MoveOutcome::CrossSpace);
            }

            let rows: Vec<(DbId, Option<DbId>, DbId, String)> = sqlx::query_as(
                "SELECT id, parent_id, space_id, title FROM pages WHERE space_id = $1",
            )
            .bind(page.space_id)
            .fetch_all(&mut *tx)
            .await?;
            let links: Vec<PageLink> = rows
                .into_iter()
                .map(|(id, parent_id, space_id, title)| PageLink {
                    id,
                    parent_id,
                    space_id,
                    title,
                })
                .collect();

            if would_cycle(&links, page_id, parent_id) {
                return Ok(MoveOutcome::WouldCycle);
            }
        }

        let update_query = format!(
            "UPDATE pages SET parent_id = $2, last_edited_by = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&update_query)
            .bind(page_id)
            .bind(new_parent)
            .bind(edited_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(MoveOutcome::Moved(page))
    }

    /// Delete a page and its entire version history. Children are promoted
    /// to roots by the schema's `ON DELETE SET NULL` parent constraint.
    ///
    /// Returns `true` if a page was removed; deleting an absent page is a
    /// no-op.
    pub async fn delete(pool: &PgPool, page_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM page_versions WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
