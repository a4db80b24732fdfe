use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::error::{Result, SysdashError};

use super::diskstats;
use super::metrics::{percent_of, Sample};
use super::provider::MetricsProvider;

/// Collects host counters through sysinfo
pub struct MetricsCollector {
    system: System,
    disks: Disks,
    networks: Networks,
    disk_path: PathBuf,
}

impl MetricsCollector {
    /// Create a collector reporting filesystem usage for `disk_path`
    pub fn new<P: AsRef<Path>>(disk_path: P) -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        let disk_path = disk_path.as_ref();
        let disk_path = disk_path
            .canonicalize()
            .unwrap_or_else(|_| disk_path.to_path_buf());

        Self {
            system: System::new_with_specifics(refresh_kind),
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            disk_path,
        }
    }

    fn collect_disk(&self) -> Result<(u64, u64, u64, u64)> {
        // Longest mount point containing the configured path
        let disk = self
            .disks
            .iter()
            .filter(|d| self.disk_path.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().as_os_str().len())
            .ok_or_else(|| {
                SysdashError::metric_collection(format!(
                    "no mounted filesystem contains {}",
                    self.disk_path.display()
                ))
            })?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());

        // The same device can be mounted more than once
        let mut seen = HashSet::new();
        let (mut read, mut written) = (0u64, 0u64);
        for d in self.disks.iter() {
            if seen.insert(d.name().to_os_string()) {
                let usage = d.usage();
                read = read.saturating_add(usage.total_read_bytes);
                written = written.saturating_add(usage.total_written_bytes);
            }
        }

        Ok((used, total, read, written))
    }

    fn collect_network(&self) -> (u64, u64) {
        self.networks
            .values()
            .fold((0u64, 0u64), |(sent, recv), data| {
                (
                    sent.saturating_add(data.total_transmitted()),
                    recv.saturating_add(data.total_received()),
                )
            })
    }
}

impl MetricsProvider for MetricsCollector {
    fn sample(&mut self) -> Result<Sample> {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        self.disks.refresh(true);
        self.networks.refresh(true);

        let (disk_used, disk_total, disk_read_bytes, disk_write_bytes) = self.collect_disk()?;
        let (net_sent_bytes, net_recv_bytes) = self.collect_network();
        let ops = diskstats::read_operation_counts();

        let mem_total = self.system.total_memory();
        let mem_used = self.system.used_memory();

        Ok(Sample {
            timestamp: Utc::now(),
            cpu_total_percent: self.system.global_cpu_usage(),
            cpu_per_core: self.system.cpus().iter().map(|c| c.cpu_usage()).collect(),
            mem_used,
            mem_total,
            mem_available: self.system.available_memory(),
            mem_percent: percent_of(mem_used, mem_total),
            disk_used,
            disk_total,
            disk_percent: percent_of(disk_used, disk_total),
            disk_read_bytes,
            disk_write_bytes,
            disk_read_count: ops.map(|(r, _)| r),
            disk_write_count: ops.map(|(_, w)| w),
            net_sent_bytes,
            net_recv_bytes,
        })
    }
}
