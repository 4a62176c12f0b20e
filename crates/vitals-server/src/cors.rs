//! CORS layer built from startup config.
//!
//! A wildcard entry (`*`) in any list means "anything". Browsers refuse a
//! literal `*` together with `Access-Control-Allow-Credentials: true`, so with
//! credentials enabled the wildcard is served by echoing the request's own
//! origin, method or headers back.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::{schema::is_wildcard, ServerConfig};

pub fn build_cors_layer(cfg: &ServerConfig) -> CorsLayer {
    let credentials = cfg.cors_allow_credentials;

    let origin = if is_wildcard(&cfg.cors_origins) {
        if credentials { AllowOrigin::mirror_request() } else { AllowOrigin::any() }
    } else {
        AllowOrigin::list(cfg.cors_origins.iter().filter_map(|o| {
            HeaderValue::from_str(o.trim())
                .map_err(|_| tracing::warn!(origin = %o, "ignoring invalid CORS origin"))
                .ok()
        }))
    };

    let methods = if is_wildcard(&cfg.cors_allow_methods) {
        if credentials { AllowMethods::mirror_request() } else { AllowMethods::any() }
    } else {
        AllowMethods::list(cfg.cors_allow_methods.iter().filter_map(|m| {
            Method::from_bytes(m.trim().to_uppercase().as_bytes())
                .map_err(|_| tracing::warn!(method = %m, "ignoring invalid CORS method"))
                .ok()
        }))
    };

    let headers = if is_wildcard(&cfg.cors_allow_headers) {
        if credentials { AllowHeaders::mirror_request() } else { AllowHeaders::any() }
    } else {
        AllowHeaders::list(cfg.cors_allow_headers.iter().filter_map(|h| {
            HeaderName::from_bytes(h.trim().as_bytes())
                .map_err(|_| tracing::warn!(header = %h, "ignoring invalid CORS header"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(credentials)
}
