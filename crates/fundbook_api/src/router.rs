//! Route table.

use crate::handlers::{contacts, funds, not_found};
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;

/// Builds the application router, nesting every route under the state's
/// base path when one is set.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/contacts/:id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route("/funds", get(funds::list_funds))
        .route("/funds/:id", get(funds::get_fund))
        .route("/funds/:fund_id/contacts", post(funds::add_contact_to_fund))
        .route(
            "/funds/:fund_id/contacts/:contact_id",
            delete(funds::remove_contact_from_fund),
        );

    let app = match state.base_path() {
        "" => routes,
        base => Router::new().nest(base, routes),
    };

    app.fallback(not_found).with_state(state)
}
