//! Route definitions for pages, the version ledger, and the hierarchy.
//!
//! Registered under `/pages`. Space-scoped listings (`/spaces/{id}/pages`
//! and `/spaces/{id}/pages/tree`) live in the spaces router.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes, registered as `/pages`.
///
/// ```text
/// POST   /                          create_page
/// GET    /{id}                      get_page
/// PUT    /{id}                      update_page
/// DELETE /{id}                      delete_page
/// GET    /{id}/children             list_children
/// POST   /{id}/move                 move_page
/// GET    /{id}/versions             list_versions
/// GET    /{id}/versions/{version}   get_version
/// POST   /{id}/revert/{version}     revert_page
/// GET    /{id}/diff                 diff_versions (?v1, ?v2)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(pages::create_page))
        .route(
            "/{id}",
            get(pages::get_page)
                .put(pages::update_page)
                .delete(pages::delete_page),
        )
        .route("/{id}/children", get(pages::list_children))
        .route("/{id}/move", post(pages::move_page))
        .route("/{id}/versions", get(pages::list_versions))
        .route("/{id}/versions/{version}", get(pages::get_version))
        .route("/{id}/revert/{version}", post(pages::revert_page))
        .route("/{id}/diff", get(pages::diff_versions))
}
