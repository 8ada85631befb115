//! Domain types shared across the Gantry workspace.

use serde::{Deserialize, Serialize};

/// Resource limits requested for a container.
///
/// This is the mutable input to the preflight resource validator: fields
/// may be zeroed or reset in place when the host does not support the
/// corresponding cgroup capability.
///
/// Byte-count fields (`memory`, `memory_swap`, `memory_reservation`,
/// `kernel_memory`) use `0` for unset; `memory_swap` additionally uses
/// `-1` for "unlimited swap". `memory_swappiness` uses `-1` for
/// unset/inherit. Cpuset fields use the kernel list syntax (`"0-3,5"`);
/// the empty string means unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceLimits {
    /// Memory limit in bytes.
    pub memory: i64,
    /// Combined memory plus swap limit in bytes; `-1` means unlimited.
    pub memory_swap: i64,
    /// Memory soft limit in bytes.
    pub memory_reservation: i64,
    /// Kernel memory limit in bytes.
    pub kernel_memory: i64,
    /// Swappiness tunable in `[0, 100]`; `-1` inherits the host setting.
    pub memory_swappiness: i64,
    /// Whether the OOM killer is disabled for the container.
    pub disable_oom_killer: bool,
    /// Maximum number of PIDs in the container.
    pub pids_limit: i64,
    /// Relative CPU weight.
    pub cpu_shares: i64,
    /// CPU CFS period in microseconds.
    pub cpu_period: i64,
    /// CPU CFS quota in microseconds.
    pub cpu_quota: i64,
    /// CPUs the container may run on, in kernel list syntax.
    pub cpuset_cpus: String,
    /// NUMA memory nodes the container may use, in kernel list syntax.
    pub cpuset_mems: String,
    /// Block I/O weight in `[10, 1000]`.
    pub blkio_weight: u16,
    /// Per-device block I/O weight overrides (`device:weight`).
    pub blkio_weight_device: Vec<String>,
    /// Per-device read rate limits in bytes per second (`device:rate`).
    pub device_read_bps: Vec<String>,
    /// Per-device write rate limits in bytes per second (`device:rate`).
    pub device_write_bps: Vec<String>,
    /// Per-device read rate limits in operations per second (`device:rate`).
    pub device_read_iops: Vec<String>,
    /// Per-device write rate limits in operations per second (`device:rate`).
    pub device_write_iops: Vec<String>,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            memory: 0,
            memory_swap: 0,
            memory_reservation: 0,
            kernel_memory: 0,
            // -1 = unset; 0 is a meaningful swappiness value
            memory_swappiness: -1,
            disable_oom_killer: false,
            pids_limit: 0,
            cpu_shares: 0,
            cpu_period: 0,
            cpu_quota: 0,
            cpuset_cpus: String::new(),
            cpuset_mems: String::new(),
            blkio_weight: 0,
            blkio_weight_device: Vec::new(),
            device_read_bps: Vec::new(),
            device_write_bps: Vec::new(),
            device_read_iops: Vec::new(),
            device_write_iops: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_unset() {
        let limits = ResourceLimits::default();
        assert_eq!(limits.memory, 0);
        assert_eq!(limits.memory_swap, 0);
        assert_eq!(limits.memory_swappiness, -1);
        assert!(!limits.disable_oom_killer);
        assert!(limits.cpuset_cpus.is_empty());
        assert!(limits.blkio_weight_device.is_empty());
    }

    #[test]
    fn deserialize_partial_create_request() {
        let request = r#"{
            "memory": 134217728,
            "memorySwap": -1,
            "cpusetCpus": "0-3",
            "deviceReadBps": ["/dev/sda:1048576"]
        }"#;
        let limits: ResourceLimits = serde_json::from_str(request).expect("should deserialize");
        assert_eq!(limits.memory, 134_217_728);
        assert_eq!(limits.memory_swap, -1);
        assert_eq!(limits.memory_swappiness, -1);
        assert_eq!(limits.cpuset_cpus, "0-3");
        assert_eq!(limits.device_read_bps, vec!["/dev/sda:1048576"]);
    }

    #[test]
    fn serialize_roundtrip_preserves_sentinels() {
        let limits = ResourceLimits {
            memory: 4 * 1024 * 1024,
            memory_swap: -1,
            ..ResourceLimits::default()
        };
        let json = serde_json::to_string(&limits).expect("should serialize");
        let back: ResourceLimits = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, limits);
    }
}
