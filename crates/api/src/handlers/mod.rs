//! HTTP handlers, grouped per feature.
//!
//! Handlers own the page-service orchestration: resolve the principal,
//! load the target, check the role/membership policy, then drive the
//! repositories.

pub mod pages;
pub mod spaces;

use sqlx::PgPool;

use quill_core::error::CoreError;
use quill_core::roles;
use quill_core::types::DbId;
use quill_db::models::page::Page;
use quill_db::models::space::Space;
use quill_db::repositories::{PageRepo, SpaceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Fetch a space by id or fail with 404.
pub(crate) async fn ensure_space(pool: &PgPool, id: DbId) -> AppResult<Space> {
    SpaceRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Space", id }))
}

/// Fetch a page by id or fail with 404.
pub(crate) async fn ensure_page(pool: &PgPool, id: DbId) -> AppResult<Page> {
    PageRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))
}

/// Require read access to a space: admin-level role, or space membership.
pub(crate) async fn require_read(pool: &PgPool, user: &AuthUser, space_id: DbId) -> AppResult<()> {
    let is_member = SpaceRepo::is_member(pool, space_id, user.user_id).await?;
    if !roles::can_read(user.role, is_member) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a member of this space".into(),
        )));
    }
    Ok(())
}

/// Require write access to a space: admin-level role, or editor membership.
pub(crate) async fn require_write(pool: &PgPool, user: &AuthUser, space_id: DbId) -> AppResult<()> {
    let is_member = SpaceRepo::is_member(pool, space_id, user.user_id).await?;
    if !roles::can_write(user.role, is_member) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Write access to this space required".into(),
        )));
    }
    Ok(())
}
