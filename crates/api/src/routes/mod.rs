pub mod health;
pub mod pages;
pub mod spaces;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /spaces                                list, create (create: admin only)
/// /spaces/{id}                           get
/// /spaces/{id}/members                   list (read access), add (admin only)
/// /spaces/{id}/members/{user_id}         remove (admin only)
/// /spaces/{id}/pages                     list (?q, limit, offset)
/// /spaces/{id}/pages/tree                hierarchical page tree
///
/// /pages                                 create
/// /pages/{id}                            get, update, delete
/// /pages/{id}/children                   direct children
/// /pages/{id}/move                       re-parent (POST)
/// /pages/{id}/versions                   version history
/// /pages/{id}/versions/{version}         single version
/// /pages/{id}/revert/{version}           revert by appending (POST)
/// /pages/{id}/diff                       line diff (?v1, ?v2)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Spaces, membership, and space-scoped page listings.
        .nest("/spaces", spaces::router())
        // Pages, versions, and the hierarchy.
        .nest("/pages", pages::router())
}
