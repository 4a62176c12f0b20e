//! Diagnostic HTTP endpoints.
//!
//! Every handler is a pure function of `AppState` (plus path/query for
//! `/items`) and stamps a fresh `timestamp` on its report.

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use vitals_core::redact::redact_vars;
use vitals_core::report::{
    self, ActuatorDetails, ActuatorHealth, ApplicationInfo, DetailedHealth, EnvReport, Greeting,
    InfoReport, ItemEcho, MetricsReport, ProbeReport,
};

use crate::app_state::AppState;
use crate::config;
use crate::error::ApiError;

pub async fn root(State(state): State<AppState>) -> Json<Greeting> {
    let cfg = state.cfg();
    Json(Greeting {
        message: format!("Hello from {}!", cfg.app_name),
        timestamp: report::timestamp(),
        version: cfg.app_version.clone(),
    })
}

fn probe_report(state: &AppState, status: &str) -> ProbeReport {
    ProbeReport {
        status: status.to_string(),
        uptime_seconds: report::uptime_seconds(state.uptime()),
        timestamp: report::timestamp(),
    }
}

/// Readiness: no dependency checks, always ready once serving.
pub async fn ready(State(state): State<AppState>) -> Json<ProbeReport> {
    Json(probe_report(&state, "ready"))
}

pub async fn health(State(state): State<AppState>) -> Json<ProbeReport> {
    Json(probe_report(&state, "healthy"))
}

/// Spring Boot actuator shape.
pub async fn actuator_health(State(state): State<AppState>) -> Json<ActuatorHealth> {
    Json(ActuatorHealth {
        status: "UP".into(),
        details: ActuatorDetails {
            uptime: report::actuator_uptime(state.uptime()),
            timestamp: report::timestamp(),
        },
    })
}

pub async fn health_detailed(State(state): State<AppState>) -> Result<Json<DetailedHealth>, ApiError> {
    let memory = state.probe().process_memory().await?;
    Ok(Json(DetailedHealth {
        status: "healthy".into(),
        version: state.cfg().app_version.clone(),
        uptime_seconds: report::uptime_seconds(state.uptime()),
        memory,
        timestamp: report::timestamp(),
    }))
}

/// `q` is optional; when repeated, the last occurrence wins.
pub async fn read_item(
    item_id: Result<Path<i64>, PathRejection>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ItemEcho>, ApiError> {
    let Path(item_id) = item_id.map_err(|r| ApiError::path("item_id", r))?;
    let query = params.into_iter().filter(|(k, _)| k == "q").map(|(_, v)| v).last();
    Ok(Json(ItemEcho { item_id, query, timestamp: report::timestamp() }))
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(MetricsReport::new(state.uptime(), state.metrics().requests.get()))
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> Response {
    let body = state.metrics().render(report::uptime_seconds(state.uptime()));
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Only routed when `enable_env_endpoint` is set.
pub async fn env_vars(State(state): State<AppState>) -> Json<EnvReport> {
    // non-UTF-8 names or values cannot be represented in JSON strings
    let vars = config::env::process_vars();
    Json(EnvReport {
        environment_variables: redact_vars(vars, state.cfg().redact_sensitive_env_vars),
        timestamp: report::timestamp(),
    })
}

/// Blocks for the probe's CPU sample interval (on the blocking pool).
pub async fn info(State(state): State<AppState>) -> Result<Json<InfoReport>, ApiError> {
    let server_info = state.probe().server_info().await?;
    let cfg = state.cfg();
    Ok(Json(InfoReport {
        server_info,
        application_info: ApplicationInfo {
            name: cfg.app_name.clone(),
            version: cfg.app_version.clone(),
            uptime_seconds: report::uptime_seconds(state.uptime()),
            total_requests: state.metrics().requests.get(),
        },
        timestamp: report::timestamp(),
    }))
}
