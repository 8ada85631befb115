//! Capability probing of the real host.
//!
//! Detection is entirely passive: a capability is reported present when
//! its cgroup control file (or controller) is visible, and absent
//! otherwise. Nothing is ever written. Both hierarchy layouts are
//! handled — cgroup v2 (unified, detected via `cgroup.controllers` at the
//! mount root) and cgroup v1 (per-subsystem roots).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use gantry_common::constants::{CGROUP_ROOT, SYS_CPU_ONLINE, SYS_NODE_ONLINE};

use crate::capabilities::Capabilities;
use crate::CapabilityProbe;

/// Probes the cgroup hierarchy the process is actually running under.
#[derive(Debug, Clone)]
pub struct HostProbe {
    root: PathBuf,
}

impl Default for HostProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe {
    /// Creates a probe against the standard cgroup mount point.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(CGROUP_ROOT),
        }
    }

    /// Creates a probe against a custom hierarchy root.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the directory of the calling process's own v2 cgroup.
    ///
    /// The root group does not expose `memory.max` and friends, so fine
    /// grained probing must happen in the group the process belongs to.
    /// Falls back to the hierarchy root when `/proc/self/cgroup` is
    /// unreadable or names a group outside this probe's root.
    fn own_v2_group(&self) -> PathBuf {
        let Ok(contents) = std::fs::read_to_string("/proc/self/cgroup") else {
            return self.root.clone();
        };
        for line in contents.lines() {
            if let Some(group) = line.strip_prefix("0::") {
                let dir = self.root.join(group.trim_start_matches('/'));
                if dir.is_dir() {
                    return dir;
                }
            }
        }
        self.root.clone()
    }

    fn probe_v2(&self) -> Capabilities {
        let controllers: HashSet<String> = std::fs::read_to_string(self.root.join("cgroup.controllers"))
            .unwrap_or_default()
            .split_whitespace()
            .map(ToOwned::to_owned)
            .collect();
        let group = self.own_v2_group();

        let memory = controllers.contains("memory");
        let cpu = controllers.contains("cpu");
        let io = controllers.contains("io");

        Capabilities {
            memory_limit: memory,
            swap_limit: memory && group.join("memory.swap.max").is_file(),
            // the unified hierarchy exposes no per-group swappiness,
            // kernel memory limit, or OOM-killer toggle
            memory_swappiness: false,
            memory_reservation: memory,
            kernel_memory: false,
            oom_kill_disable: false,
            pids_limit: controllers.contains("pids"),
            cpu_shares: cpu,
            cpu_cfs_period: cpu,
            cpu_cfs_quota: cpu,
            cpuset: controllers.contains("cpuset"),
            blkio_weight: io
                && (group.join("io.weight").is_file() || group.join("io.bfq.weight").is_file()),
            blkio_weight_device: io && group.join("io.bfq.weight").is_file(),
            blkio_read_bps_device: io,
            blkio_write_bps_device: io,
            blkio_read_iops_device: io,
            blkio_write_iops_device: io,
            cpus: read_list(&self.root.join("cpuset.cpus.effective"))
                .or_else(|| read_list(Path::new(SYS_CPU_ONLINE)))
                .unwrap_or_default(),
            mems: read_list(&self.root.join("cpuset.mems.effective"))
                .or_else(|| read_list(Path::new(SYS_NODE_ONLINE)))
                .unwrap_or_default(),
        }
    }

    fn probe_v1(&self) -> Capabilities {
        let memory = self.root.join("memory");
        let cpu = self.root.join("cpu");
        let cpuset = self.root.join("cpuset");
        let blkio = self.root.join("blkio");

        Capabilities {
            memory_limit: memory.join("memory.limit_in_bytes").is_file(),
            swap_limit: memory.join("memory.memsw.limit_in_bytes").is_file(),
            memory_swappiness: memory.join("memory.swappiness").is_file(),
            memory_reservation: memory.join("memory.soft_limit_in_bytes").is_file(),
            kernel_memory: memory.join("memory.kmem.limit_in_bytes").is_file(),
            oom_kill_disable: memory.join("memory.oom_control").is_file(),
            pids_limit: self.root.join("pids").is_dir(),
            cpu_shares: cpu.join("cpu.shares").is_file(),
            cpu_cfs_period: cpu.join("cpu.cfs_period_us").is_file(),
            cpu_cfs_quota: cpu.join("cpu.cfs_quota_us").is_file(),
            cpuset: cpuset.join("cpuset.cpus").is_file(),
            blkio_weight: blkio.join("blkio.weight").is_file(),
            blkio_weight_device: blkio.join("blkio.weight_device").is_file(),
            blkio_read_bps_device: blkio.join("blkio.throttle.read_bps_device").is_file(),
            blkio_write_bps_device: blkio.join("blkio.throttle.write_bps_device").is_file(),
            blkio_read_iops_device: blkio.join("blkio.throttle.read_iops_device").is_file(),
            blkio_write_iops_device: blkio.join("blkio.throttle.write_iops_device").is_file(),
            cpus: read_list(&cpuset.join("cpuset.cpus"))
                .or_else(|| read_list(Path::new(SYS_CPU_ONLINE)))
                .unwrap_or_default(),
            mems: read_list(&cpuset.join("cpuset.mems"))
                .or_else(|| read_list(Path::new(SYS_NODE_ONLINE)))
                .unwrap_or_default(),
        }
    }
}

impl CapabilityProbe for HostProbe {
    fn capabilities(&self) -> Capabilities {
        let unified = self.root.join("cgroup.controllers").is_file();
        let caps = if unified {
            self.probe_v2()
        } else {
            self.probe_v1()
        };
        tracing::debug!(
            unified,
            memory = caps.memory_limit,
            swap = caps.swap_limit,
            cpuset = caps.cpuset,
            cpus = %caps.cpus,
            mems = %caps.mems,
            "probed cgroup capabilities"
        );
        caps
    }
}

/// Reads a kernel list file, returning `None` when missing or empty.
fn read_list(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
