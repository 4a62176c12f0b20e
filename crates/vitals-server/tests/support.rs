//! Router harness shared by the HTTP tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use vitals_core::error::{Result, VitalsError};
use vitals_core::report::{ProcessMemory, ServerInfo};
use vitals_server::{app_state::AppState, config::ServerConfig, probe::SystemProbe, router};

/// Fixed host numbers, no sampling delay.
pub struct FakeProbe;

#[async_trait]
impl SystemProbe for FakeProbe {
    async fn server_info(&self) -> Result<ServerInfo> {
        Ok(ServerInfo {
            runtime_version: "vitals-server/test".into(),
            platform: "Linux-6.1-x86_64".into(),
            processor: "Test CPU".into(),
            memory_usage_percent: 42.5,
            cpu_count: 4,
            cpu_percent: 12.5,
        })
    }

    async fn process_memory(&self) -> Result<ProcessMemory> {
        Ok(ProcessMemory::from_bytes(64 * 1024 * 1024, 512 * 1024 * 1024))
    }
}

/// Like `FakeProbe`, but `server_info` takes `delay` to answer.
pub struct SlowProbe {
    pub delay: std::time::Duration,
}

#[async_trait]
impl SystemProbe for SlowProbe {
    async fn server_info(&self) -> Result<ServerInfo> {
        tokio::time::sleep(self.delay).await;
        FakeProbe.server_info().await
    }

    async fn process_memory(&self) -> Result<ProcessMemory> {
        FakeProbe.process_memory().await
    }
}

/// Every call fails.
pub struct FailingProbe;

#[async_trait]
impl SystemProbe for FailingProbe {
    async fn server_info(&self) -> Result<ServerInfo> {
        Err(VitalsError::Probe("cpu counters unavailable".into()))
    }

    async fn process_memory(&self) -> Result<ProcessMemory> {
        Err(VitalsError::Internal("proc table locked".into()))
    }
}

/// Every call panics.
pub struct PanickingProbe;

#[async_trait]
impl SystemProbe for PanickingProbe {
    async fn server_info(&self) -> Result<ServerInfo> {
        panic!("probe exploded")
    }

    async fn process_memory(&self) -> Result<ProcessMemory> {
        panic!("probe exploded")
    }
}

pub fn app_with(cfg: ServerConfig, probe: Arc<dyn SystemProbe>) -> Router {
    router::build_router(AppState::with_probe(cfg, probe))
}

pub fn app() -> Router {
    app_with(ServerConfig::default(), Arc::new(FakeProbe))
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
    pub text: String,
}

impl Reply {
    pub fn request_count(&self) -> u64 {
        self.headers["x-request-count"].to_str().unwrap().parse().unwrap()
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Reply {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    Reply { status, headers, body, text }
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    send(app, Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap()).await
}
