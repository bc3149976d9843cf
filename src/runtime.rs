//! Process and host introspection for the `/api/env` endpoint.

use serde::Serialize;
use sysinfo::{MemoryRefreshKind, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

use crate::config::ServiceConfig;
use crate::error::AppError;

/// Version of the Rust toolchain that compiled this binary, e.g. `1.82.0`.
pub const RUSTC_VERSION: &str = env!("API_SERVICE_RUSTC_VERSION");

/// Snapshot of the running process, serialized with camelCase keys.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInfo {
    /// Version of the compiling toolchain with a `v` prefix, e.g. `v1.82.0`.
    /// This is not the service's own version.
    pub runtime_version: String,
    pub platform: &'static str,
    pub memory_usage: MemoryUsage,
    pub env: String,
}

/// Memory statistics in bytes.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    /// Resident set size of this process
    pub rss: u64,
    /// Virtual memory size of this process
    pub virtual_memory: u64,
    pub system_total: u64,
    pub system_used: u64,
}

impl RuntimeInfo {
    /// Collect a snapshot for the given service.
    ///
    /// Blocks briefly while reading process statistics from the OS; call from
    /// a blocking-capable context.
    pub fn collect(service: &ServiceConfig) -> Result<Self, AppError> {
        Ok(Self {
            runtime_version: format!("v{}", RUSTC_VERSION),
            platform: std::env::consts::OS,
            memory_usage: MemoryUsage::sample()?,
            env: service.environment.clone(),
        })
    }
}

impl MemoryUsage {
    /// Sample current process and host memory.
    pub fn sample() -> Result<Self, AppError> {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| AppError::Internal(format!("Failed to resolve current pid: {}", e)))?;

        let mut sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::new().with_ram()),
        );
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            false,
            ProcessRefreshKind::new().with_memory(),
        );

        let process = sys
            .process(pid)
            .ok_or_else(|| AppError::Internal(format!("Process {} not visible to sysinfo", pid)))?;

        Ok(Self {
            rss: process.memory(),
            virtual_memory: process.virtual_memory(),
            system_total: sys.total_memory(),
            system_used: sys.used_memory(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_reports_platform_and_version() {
        let service = ServiceConfig::default();
        let info = RuntimeInfo::collect(&service).unwrap();
        assert_eq!(info.runtime_version, format!("v{}", RUSTC_VERSION));
        assert_ne!(info.runtime_version, format!("v{}", env!("CARGO_PKG_VERSION")));
        assert_eq!(info.platform, std::env::consts::OS);
        assert_eq!(info.env, "development");
        assert!(info.memory_usage.rss > 0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let info = RuntimeInfo {
            runtime_version: "v1.2.3".to_string(),
            platform: "linux",
            memory_usage: MemoryUsage {
                rss: 1,
                virtual_memory: 2,
                system_total: 3,
                system_used: 4,
            },
            env: "test".to_string(),
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["runtimeVersion"], "v1.2.3");
        assert_eq!(value["memoryUsage"]["virtualMemory"], 2);
        assert_eq!(value["memoryUsage"]["systemTotal"], 3);
        assert_eq!(value["env"], "test");
    }
}
