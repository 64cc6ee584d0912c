//! Customer and address REST routes.

use crate::handlers::{addresses, customers};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/customers",
            get(customers::list)
                .post(customers::create)
                .delete(customers::delete_all),
        )
        .route(
            "/customers/:id",
            get(customers::read)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route(
            "/customers/:id/addresses",
            get(addresses::list_for_customer).post(addresses::create),
        )
        .route(
            "/addresses/:address_id",
            get(addresses::read)
                .put(addresses::update)
                .delete(addresses::delete),
        )
        .with_state(state)
}
