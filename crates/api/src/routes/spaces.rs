//! Route definitions for spaces and space membership.
//!
//! Registered under `/spaces`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{pages, spaces};
use crate::state::AppState;

/// Space routes, registered as `/spaces`.
///
/// ```text
/// GET    /                        list_spaces
/// POST   /                        create_space
/// GET    /{id}                    get_space
/// GET    /{id}/members            list_members
/// POST   /{id}/members            add_member
/// DELETE /{id}/members/{user_id}  remove_member
/// GET    /{id}/pages              list_pages (?q, limit, offset)
/// GET    /{id}/pages/tree         page_tree
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(spaces::list_spaces).post(spaces::create_space))
        .route("/{id}", get(spaces::get_space))
        .route(
            "/{id}/members",
            get(spaces::list_members).post(spaces::add_member),
        )
        .route(
            "/{id}/members/{user_id}",
            axum::routing::delete(spaces::remove_member),
        )
        .route("/{id}/pages", get(pages::list_pages))
        .route("/{id}/pages/tree", get(pages::page_tree))
}
