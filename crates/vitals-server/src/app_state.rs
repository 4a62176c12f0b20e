//! Shared application state for the vitals server.
//!
//! Everything a handler may read lives here and is handed to the router at
//! construction: the immutable config, the boot instant, the request metrics
//! and the system probe.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ServerConfig;
use crate::obs::metrics::ServerMetrics;
use crate::probe::{SysinfoProbe, SystemProbe};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ServerMetrics>,
    probe: Arc<dyn SystemProbe>,
}

struct AppStateInner {
    cfg: ServerConfig,
    started: Instant,
}

impl AppState {
    /// Build state with the real `sysinfo` probe; the boot instant is taken now.
    pub fn new(cfg: ServerConfig) -> Self {
        Self::with_probe(cfg, Arc::new(SysinfoProbe::default()))
    }

    pub fn with_probe(cfg: ServerConfig, probe: Arc<dyn SystemProbe>) -> Self {
        Self::with_parts(cfg, Arc::new(ServerMetrics::new()), probe)
    }

    /// Full injection, e.g. to share one metrics registry between routers.
    pub fn with_parts(cfg: ServerConfig, metrics: Arc<ServerMetrics>, probe: Arc<dyn SystemProbe>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, started: Instant::now() }),
            metrics,
            probe,
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    /// Elapsed time since this state was built.
    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.metrics
    }

    pub fn probe(&self) -> Arc<dyn SystemProbe> {
        Arc::clone(&self.probe)
    }
}
