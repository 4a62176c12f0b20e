//! Axum router wiring.
//!
//! Layer order, innermost first: CORS, panic catcher, request tracking. The
//! tracker is outermost so preflights, 404s and 500s are all counted.

use axum::{middleware, routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{app_state::AppState, cors, error, middleware::track_requests, ops};

pub fn build_router(state: AppState) -> Router {
    let cfg = state.cfg();

    let mut routes = Router::new()
        .route("/", get(ops::root))
        .route("/ready", get(ops::ready))
        .route("/health", get(ops::health))
        .route("/health/detailed", get(ops::health_detailed))
        .route("/actuator/health", get(ops::actuator_health))
        .route("/items/:item_id", get(ops::read_item))
        .route("/metrics", get(ops::metrics))
        .route("/metrics/prometheus", get(ops::metrics_prometheus))
        .route("/info", get(ops::info));

    if cfg.enable_env_endpoint {
        routes = routes.route("/env", get(ops::env_vars));
    } else {
        tracing::info!("/env endpoint disabled by config");
    }

    routes
        .fallback(error::not_found)
        .layer(cors::build_cors_layer(cfg))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .with_state(state)
}
