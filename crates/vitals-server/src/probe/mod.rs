//! Host and process statistics.
//!
//! `SystemProbe` is the seam between the handlers and the operating system so
//! the router can be exercised without sampling real CPU counters.

mod sysinfo_probe;

use async_trait::async_trait;

use vitals_core::error::Result;
use vitals_core::report::{ProcessMemory, ServerInfo};

pub use sysinfo_probe::SysinfoProbe;

#[async_trait]
pub trait SystemProbe: Send + Sync {
    /// Identification strings plus memory and CPU load. May block for the
    /// configured CPU sample interval; implementations must keep that wait
    /// off the async worker threads.
    async fn server_info(&self) -> Result<ServerInfo>;

    /// Memory footprint of the current process.
    async fn process_memory(&self) -> Result<ProcessMemory>;
}

/// `<crate>/<version> (<arch>-<os>)`, the server's own identification string.
pub fn runtime_version() -> String {
    format!(
        "{}/{} ({}-{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}
