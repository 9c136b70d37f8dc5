//! Route table of the quotation server.
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use quotation_common::net::{QUOTATIONS_PATH, WS_PATH};

use crate::handlers;
use crate::store::QuotationStore;
use crate::ws;

/// Builds the application router over the given store.
///
/// CORS is permissive: browser frontends on other origins consume this
/// API directly.
pub fn build_router(store: QuotationStore) -> Router {
    let item_path = format!("{}/:id", QUOTATIONS_PATH);
    Router::new()
        .route(
            QUOTATIONS_PATH,
            get(handlers::list_quotations).post(handlers::create_quotation),
        )
        .route(
            &item_path,
            put(handlers::update_quotation).delete(handlers::delete_quotation),
        )
        .route("/test", get(handlers::test_handler))
        .route(WS_PATH, get(ws::ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(store)
}
