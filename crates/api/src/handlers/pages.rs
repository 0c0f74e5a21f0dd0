//! Handlers for page CRUD, version history, revert, and the page tree.
//!
//! This is the page-service façade: each operation resolves the principal,
//! loads the target page, checks the role/membership policy against the
//! page's space, then drives the version-ledger and hierarchy repositories.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use quill_core::diff::{compute_line_diff, DiffLineType};
use quill_core::error::CoreError;
use quill_core::page::{validate_content, validate_title};
use quill_core::roles;
use quill_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use quill_core::tree::build_tree;
use quill_core::types::DbId;
use quill_db::models::page::{CreatePage, MovePage, Page, PageWithContent, UpdatePage};
use quill_db::models::page_version::{DiffLineDto, VersionDiff};
use quill_db::repositories::{MoveOutcome, PageRepo, PageVersionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_page, ensure_space, require_read, require_write};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Query param types
-------------------------------------------------------------------------- */

#[derive(Debug, serde::Deserialize)]
pub struct ListPagesParams {
    /// Optional title substring filter.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct DiffParams {
    pub v1: i32,
    pub v2: i32,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Map a re-parent outcome onto the error taxonomy, or return the moved page.
fn move_outcome_to_result(
    outcome: MoveOutcome,
    page_id: DbId,
    requested_parent: Option<DbId>,
) -> AppResult<Page> {
    match outcome {
        MoveOutcome::Moved(page) => Ok(page),
        MoveOutcome::PageNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        })),
        MoveOutcome::ParentNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Parent page",
            id: requested_parent.unwrap_or(page_id),
        })),
        MoveOutcome::CrossSpace => Err(AppError::Core(CoreError::Validation(
            "Parent page must belong to the same space".into(),
        ))),
        MoveOutcome::WouldCycle => Err(AppError::Core(CoreError::Validation(
            "Cannot move a page inside its own subtree".into(),
        ))),
    }
}

/// Fetch a specific version of a page or fail with 404.
async fn ensure_version(
    pool: &sqlx::PgPool,
    page_id: DbId,
    version: i32,
) -> AppResult<quill_db::models::page_version::PageVersion> {
    PageVersionRepo::find_by_page_and_version(pool, page_id, version)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Version",
            id: version as DbId,
        }))
}

/* --------------------------------------------------------------------------
Page CRUD
-------------------------------------------------------------------------- */

/// POST /pages
///
/// Create a page with its initial content as version 1. Requires write
/// access to the target space. A parent, if given, must resolve to a page
/// in that same space.
pub async fn create_page(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    validate_content(&input.content).map_err(AppError::Core)?;

    let space = ensure_space(&state.pool, input.space_id).await?;
    require_write(&state.pool, &auth, space.id).await?;

    if let Some(parent_id) = input.parent_id {
        let parent = PageRepo::find_by_id(&state.pool, parent_id).await?;
        match parent {
            Some(p) if p.space_id == space.id => {}
            _ => {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Parent page",
                    id: parent_id,
                }));
            }
        }
    }

    let page = PageRepo::create(&state.pool, &input, Some(auth.user_id)).await?;

    tracing::info!(
        user_id = auth.user_id,
        page_id = page.id,
        space_id = page.space_id,
        "Page created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// GET /pages/{id}
///
/// Fetch a page together with its latest version's content.
pub async fn get_page(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;
    require_read(&state.pool, &auth, page.space_id).await?;

    let latest = PageVersionRepo::find_latest(&state.pool, page.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Internal(format!(
                "Page {id} has no latest version"
            )))
        })?;

    Ok(Json(DataResponse {
        data: PageWithContent {
            page,
            content: latest.content,
        },
    }))
}

/// GET /spaces/{space_id}/pages
///
/// List pages in a space, most recently updated first, with optional title
/// search and paging.
pub async fn list_pages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(space_id): Path<DbId>,
    Query(params): Query<ListPagesParams>,
) -> AppResult<impl IntoResponse> {
    let space = ensure_space(&state.pool, space_id).await?;
    require_read(&state.pool, &auth, space.id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let pages =
        PageRepo::list_by_space(&state.pool, space.id, params.q.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /spaces/{space_id}/pages/tree
///
/// Hierarchical view of a space's pages. Pages with unresolvable parents
/// are surfaced as roots rather than dropped.
pub async fn page_tree(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(space_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let space = ensure_space(&state.pool, space_id).await?;
    require_read(&state.pool, &auth, space.id).await?;

    let links = PageRepo::list_links(&state.pool, space.id).await?;
    Ok(Json(DataResponse {
        data: build_tree(&links),
    }))
}

/// GET /pages/{id}/children
///
/// Direct children of a page, ordered by title.
pub async fn list_children(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;
    require_read(&state.pool, &auth, page.space_id).await?;

    let children = PageRepo::list_children(&state.pool, page.space_id, Some(page.id)).await?;
    Ok(Json(DataResponse { data: children }))
}

/// PUT /pages/{id}
///
/// Partial update. `content` (even empty) appends a new version; a present
/// `parent_id` (including explicit null) re-parents; a present `title`
/// renames. Omitted fields are untouched.
///
/// The re-parent is applied first: it carries the rejectable validation
/// (missing parent, cross-space, cycle), so a combined update that names a
/// bad parent fails before any version is appended.
pub async fn update_page(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<impl IntoResponse> {
    let mut page = ensure_page(&state.pool, id).await?;
    require_write(&state.pool, &auth, page.space_id).await?;

    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::Core)?;
    }
    if let Some(ref content) = input.content {
        validate_content(content).map_err(AppError::Core)?;
    }

    if let Some(new_parent) = input.parent_id {
        let outcome = PageRepo::set_parent(&state.pool, id, new_parent, Some(auth.user_id)).await?;
        page = move_outcome_to_result(outcome, id, new_parent)?;
    }

    if let Some(ref content) = input.content {
        let (updated, _) = PageRepo::append_version(
            &state.pool,
            id,
            content,
            Some(auth.user_id),
            input.edit_summary.as_deref(),
        )
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
        page = updated;
    }

    if let Some(ref title) = input.title {
        page = PageRepo::update_title(&state.pool, id, title, Some(auth.user_id))
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    }

    tracing::info!(
        user_id = auth.user_id,
        page_id = id,
        new_version = (input.content.is_some()).then_some(page.current_version),
        "Page updated"
    );

    Ok(Json(DataResponse { data: page }))
}

/// POST /pages/{id}/move
///
/// Re-parent a page (`parent_id: null` promotes it to a root). Fails with a
/// validation error on cross-space parents and on moves into the page's own
/// subtree.
pub async fn move_page(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MovePage>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;
    require_write(&state.pool, &auth, page.space_id).await?;

    let outcome =
        PageRepo::set_parent(&state.pool, id, input.parent_id, Some(auth.user_id)).await?;
    let page = move_outcome_to_result(outcome, id, input.parent_id)?;

    tracing::info!(
        user_id = auth.user_id,
        page_id = id,
        parent_id = input.parent_id,
        "Page moved"
    );

    Ok(Json(DataResponse { data: page }))
}

/// DELETE /pages/{id}
///
/// Delete a page and its whole version history (admin-level only; stricter
/// than write). Children are orphaned to root, never cascade-deleted.
pub async fn delete_page(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;

    if !roles::can_delete(auth.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required to delete pages".into(),
        )));
    }

    PageRepo::delete(&state.pool, page.id).await?;

    tracing::info!(
        user_id = auth.user_id,
        page_id = page.id,
        space_id = page.space_id,
        "Page deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Versions
-------------------------------------------------------------------------- */

/// GET /pages/{id}/versions
///
/// Full version history of a page, newest first.
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;
    require_read(&state.pool, &auth, page.space_id).await?;

    let versions = PageVersionRepo::list_by_page(&state.pool, page.id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /pages/{id}/versions/{version}
pub async fn get_version(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, version)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;
    require_read(&state.pool, &auth, page.space_id).await?;

    let ver = ensure_version(&state.pool, page.id, version).await?;
    Ok(Json(DataResponse { data: ver }))
}

/// POST /pages/{id}/revert/{version}
///
/// Restore the page's live content to an earlier version by appending that
/// content as a brand-new version. History is never rewritten; reverting to
/// the current latest is legal and still appends an audit entry.
pub async fn revert_page(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, version)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;
    require_write(&state.pool, &auth, page.space_id).await?;

    let target = ensure_version(&state.pool, page.id, version).await?;

    let summary = format!("Reverted to version {}", target.version);
    let (page, _) = PageRepo::append_version(
        &state.pool,
        page.id,
        &target.content,
        Some(auth.user_id),
        Some(&summary),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    tracing::info!(
        user_id = auth.user_id,
        page_id = id,
        reverted_to = version,
        new_version = page.current_version,
        "Page reverted"
    );

    Ok(Json(DataResponse { data: page }))
}

/* --------------------------------------------------------------------------
Diff
-------------------------------------------------------------------------- */

/// GET /pages/{id}/diff?v1=X&v2=Y
///
/// Line-level diff between two versions of a page.
pub async fn diff_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DiffParams>,
) -> AppResult<impl IntoResponse> {
    let page = ensure_page(&state.pool, id).await?;
    require_read(&state.pool, &auth, page.space_id).await?;

    let v1 = ensure_version(&state.pool, page.id, params.v1).await?;
    let v2 = ensure_version(&state.pool, page.id, params.v2).await?;

    let lines: Vec<DiffLineDto> = compute_line_diff(&v1.content, &v2.content)
        .into_iter()
        .map(|d| DiffLineDto {
            line_type: match d.line_type {
                DiffLineType::Added => "added".to_string(),
                DiffLineType::Removed => "removed".to_string(),
                DiffLineType::Unchanged => "unchanged".to_string(),
            },
            content: d.content,
        })
        .collect();

    Ok(Json(DataResponse {
        data: VersionDiff {
            page_id: page.id,
            v1: params.v1,
            v2: params.v2,
            lines,
        },
    }))
}
