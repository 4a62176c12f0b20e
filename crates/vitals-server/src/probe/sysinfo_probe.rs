use std::time::Duration;

use async_trait::async_trait;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use vitals_core::error::{Result, VitalsError};
use vitals_core::report::{ProcessMemory, ServerInfo};

use super::{runtime_version, SystemProbe};

/// Probe backed by the `sysinfo` crate.
#[derive(Debug, Clone)]
pub struct SysinfoProbe {
    cpu_sample: Duration,
}

impl SysinfoProbe {
    pub const DEFAULT_CPU_SAMPLE: Duration = Duration::from_secs(1);

    /// `cpu_sample` is raised to `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL` if shorter.
    pub fn new(cpu_sample: Duration) -> Self {
        Self { cpu_sample: cpu_sample.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL) }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CPU_SAMPLE)
    }
}

#[async_trait]
impl SystemProbe for SysinfoProbe {
    async fn server_info(&self) -> Result<ServerInfo> {
        let interval = self.cpu_sample;
        tokio::task::spawn_blocking(move || sample_host(interval))
            .await
            .map_err(|e| VitalsError::Probe(format!("cpu sampler task failed: {e}")))?
    }

    async fn process_memory(&self) -> Result<ProcessMemory> {
        let pid = sysinfo::get_current_pid().map_err(|e| VitalsError::Probe(e.to_string()))?;
        let mut sys = System::new();
        sys.refresh_process(pid);
        let proc_ = sys
            .process(pid)
            .ok_or_else(|| VitalsError::Probe(format!("process {pid} not visible")))?;
        Ok(ProcessMemory::from_bytes(proc_.memory(), proc_.virtual_memory()))
    }
}

/// Runs on the blocking pool: two CPU refreshes `interval` apart.
fn sample_host(interval: Duration) -> Result<ServerInfo> {
    let mut sys = System::new_with_specifics(
        RefreshKind::new()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything()),
    );
    std::thread::sleep(interval);
    sys.refresh_cpu_usage();

    let total = sys.total_memory();
    if total == 0 {
        return Err(VitalsError::Probe("total memory reported as zero".into()));
    }
    let memory_usage_percent = (sys.used_memory() as f64 / total as f64 * 1000.0).round() / 10.0;
    let cpu_percent = (f64::from(sys.global_cpu_info().cpu_usage()) * 10.0).round() / 10.0;

    let processor = sys
        .cpus()
        .first()
        .map(|c| c.brand().trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| std::env::consts::ARCH.to_string());

    let platform = format!(
        "{}-{}-{}",
        System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        System::kernel_version().unwrap_or_else(|| "unknown".into()),
        std::env::consts::ARCH
    );

    tracing::debug!(cpu_percent, memory_usage_percent, "host sample taken");

    Ok(ServerInfo {
        runtime_version: runtime_version(),
        platform,
        processor,
        memory_usage_percent,
        cpu_count: sys.cpus().len(),
        cpu_percent,
    })
}
