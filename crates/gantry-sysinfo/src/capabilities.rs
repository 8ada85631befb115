//! The host capability snapshot consumed by preflight validation.

use gantry_common::error::{GantryError, Result};

use crate::cpuset;

/// What the running kernel and cgroup hierarchy support.
///
/// One boolean per limit the preflight can negotiate, plus the host's
/// available CPU and NUMA-node lists in kernel list syntax. A snapshot is
/// plain data: cheap to clone, comparable, and constructible directly in
/// tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Memory limits can be set.
    pub memory_limit: bool,
    /// Combined memory+swap limits can be set.
    pub swap_limit: bool,
    /// Per-group swappiness can be tuned.
    pub memory_swappiness: bool,
    /// Memory soft limits (reservations) can be set.
    pub memory_reservation: bool,
    /// Kernel memory limits can be set.
    pub kernel_memory: bool,
    /// The OOM killer can be disabled per group.
    pub oom_kill_disable: bool,
    /// PID-count limits can be set.
    pub pids_limit: bool,
    /// Relative CPU weights can be set.
    pub cpu_shares: bool,
    /// The CPU CFS period can be tuned.
    pub cpu_cfs_period: bool,
    /// CPU CFS quotas can be set.
    pub cpu_cfs_quota: bool,
    /// CPU and memory-node placement can be restricted.
    pub cpuset: bool,
    /// Block I/O weights can be set.
    pub blkio_weight: bool,
    /// Per-device block I/O weights can be set.
    pub blkio_weight_device: bool,
    /// Per-device read byte-rate limits can be set.
    pub blkio_read_bps_device: bool,
    /// Per-device write byte-rate limits can be set.
    pub blkio_write_bps_device: bool,
    /// Per-device read operation-rate limits can be set.
    pub blkio_read_iops_device: bool,
    /// Per-device write operation-rate limits can be set.
    pub blkio_write_iops_device: bool,
    /// CPUs available on the host, in kernel list syntax.
    pub cpus: String,
    /// NUMA memory nodes available on the host, in kernel list syntax.
    pub mems: String,
}

impl Capabilities {
    /// Checks whether every CPU in `requested` is available on the host.
    ///
    /// The empty string requests no restriction and is always available.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::CpusetSyntax`] if `requested` or the host's
    /// own CPU list is not valid kernel list syntax.
    pub fn is_cpuset_cpus_available(&self, requested: &str) -> Result<bool> {
        Self::is_list_available("cpuset cpus", requested, &self.cpus)
    }

    /// Checks whether every NUMA node in `requested` is available.
    ///
    /// The empty string requests no restriction and is always available.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::CpusetSyntax`] if `requested` or the host's
    /// own node list is not valid kernel list syntax.
    pub fn is_cpuset_mems_available(&self, requested: &str) -> Result<bool> {
        Self::is_list_available("cpuset mems", requested, &self.mems)
    }

    fn is_list_available(kind: &'static str, requested: &str, available: &str) -> Result<bool> {
        let requested_ids = cpuset::parse_list(requested).ok_or_else(|| GantryError::CpusetSyntax {
            kind,
            requested: requested.to_owned(),
        })?;
        if requested_ids.is_empty() {
            return Ok(true);
        }
        let available_ids = cpuset::parse_list(available).ok_or_else(|| GantryError::CpusetSyntax {
            kind,
            requested: available.to_owned(),
        })?;
        Ok(requested_ids.is_subset(&available_ids))
    }
}
