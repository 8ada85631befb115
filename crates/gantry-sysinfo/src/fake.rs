//! Deterministic capability source for tests.

use crate::capabilities::Capabilities;
use crate::CapabilityProbe;

/// A [`CapabilityProbe`] that returns a fixed, caller-chosen snapshot.
///
/// Never touches the filesystem, so validator behavior can be pinned down
/// regardless of the machine the tests run on.
#[derive(Debug, Clone)]
pub struct FakeProbe {
    caps: Capabilities,
}

impl FakeProbe {
    /// Wraps an arbitrary snapshot.
    #[must_use]
    pub const fn new(caps: Capabilities) -> Self {
        Self { caps }
    }

    /// A host that supports every limit, with cpus `0-7` and mems `0`.
    #[must_use]
    pub fn full() -> Self {
        Self::new(Capabilities {
            memory_limit: true,
            swap_limit: true,
            memory_swappiness: true,
            memory_reservation: true,
            kernel_memory: true,
            oom_kill_disable: true,
            pids_limit: true,
            cpu_shares: true,
            cpu_cfs_period: true,
            cpu_cfs_quota: true,
            cpuset: true,
            blkio_weight: true,
            blkio_weight_device: true,
            blkio_read_bps_device: true,
            blkio_write_bps_device: true,
            blkio_read_iops_device: true,
            blkio_write_iops_device: true,
            cpus: "0-7".into(),
            mems: "0".into(),
        })
    }
}

impl CapabilityProbe for FakeProbe {
    fn capabilities(&self) -> Capabilities {
        self.caps.clone()
    }
}
