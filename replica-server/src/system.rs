use lb_test_util::SystemMetrics;
use sysinfo::System;

pub fn hostname() -> String {
    System::host_name().unwrap_or_else(|| "unknown".to_string())
}

/// Point-in-time host metrics for the health payload.
pub fn snapshot() -> SystemMetrics {
    let mut sys = System::new();
    sys.refresh_memory();
    let load = System::load_average();
    SystemMetrics {
        uptime_seconds: System::uptime(),
        free_memory_mb: sys.available_memory() / 1024 / 1024,
        total_memory_mb: sys.total_memory() / 1024 / 1024,
        cpu_load_avg: [load.one, load.five, load.fifteen],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_consistent_memory() {
        let metrics = snapshot();
        assert!(metrics.free_memory_mb <= metrics.total_memory_mb);
        assert!(metrics.total_memory_mb > 0);
    }

    #[test]
    fn hostname_is_never_empty() {
        assert!(!hostname().is_empty());
    }
}
