//! Handlers for space CRUD and membership management.
//!
//! Spaces scope page access for non-admin principals. Membership changes
//! only ever happen through the explicit endpoints here -- no read path
//! mutates membership as a side effect.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use quill_core::error::CoreError;
use quill_core::types::DbId;
use quill_db::models::space::{AddSpaceMember, CreateSpace};
use quill_db::repositories::SpaceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_space, require_read};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn require_admin(user: &AuthUser) -> AppResult<()> {
    if !user.role.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }
    Ok(())
}

/// POST /spaces
///
/// Create a new space (admin only). The creator is recorded but not
/// auto-enrolled; membership is managed explicitly.
pub async fn create_space(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSpace>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }

    let space = SpaceRepo::create(&state.pool, &input, Some(auth.user_id)).await?;

    tracing::info!(user_id = auth.user_id, space_id = space.id, "Space created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: space })))
}

/// GET /spaces
///
/// List spaces: admins see all, everyone else sees their memberships.
pub async fn list_spaces(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let spaces = if auth.role.is_admin() {
        SpaceRepo::list_all(&state.pool).await?
    } else {
        SpaceRepo::list_for_user(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: spaces }))
}

/// GET /spaces/{id}
pub async fn get_space(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let space = ensure_space(&state.pool, id).await?;
    require_read(&state.pool, &auth, space.id).await?;
    Ok(Json(DataResponse { data: space }))
}

/// GET /spaces/{id}/members
///
/// List a space's member user ids. Requires read access to the space.
pub async fn list_members(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let space = ensure_space(&state.pool, id).await?;
    require_read(&state.pool, &auth, space.id).await?;

    let members = SpaceRepo::list_members(&state.pool, space.id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /spaces/{id}/members
///
/// Add a member to a space (admin only). Idempotent.
pub async fn add_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddSpaceMember>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;
    let space = ensure_space(&state.pool, id).await?;

    SpaceRepo::add_member(&state.pool, space.id, input.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        space_id = space.id,
        member_id = input.user_id,
        "Space member added"
    );

    let members = SpaceRepo::list_members(&state.pool, space.id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// DELETE /spaces/{id}/members/{user_id}
///
/// Remove a member from a space (admin only).
pub async fn remove_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;
    let space = ensure_space(&state.pool, id).await?;

    SpaceRepo::remove_member(&state.pool, space.id, member_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        space_id = space.id,
        member_id = member_id,
        "Space member removed"
    );

    Ok(StatusCode::NO_CONTENT)
}
