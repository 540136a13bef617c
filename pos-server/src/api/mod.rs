//! HTTP API
//!
//! One module per resource, each exposing a `router()` merged in
//! [`build_router`]. [`build_app`] wraps the routes with the shared
//! middleware stack.

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod areas;
pub mod categories;
pub mod customer;
pub mod health;
pub mod middleware;
pub mod orders;
pub mod products;
pub mod qr_export;
pub mod staff_calls;
pub mod store_settings;
pub mod sync;
pub mod table_map;
pub mod tables;

pub mod router_ext;
pub use router_ext::{OneshotResult, OneshotRouter};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Admin API
        .merge(areas::router())
        .merge(tables::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(table_map::router())
        .merge(staff_calls::router())
        .merge(store_settings::router())
        .merge(qr_export::router())
        // Customer API
        .merge(customer::router())
        // Realtime sync feed
        .merge(sync::router())
        // Health API - public route
        .merge(health::router())
}

/// Build a fully configured application with all middleware
///
/// Used by both the HTTP server and oneshot calls
pub fn build_app() -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging - outermost, executed first
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
