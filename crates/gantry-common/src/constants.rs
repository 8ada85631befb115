//! Numeric bounds and well-known paths for preflight validation.

/// Smallest memory limit a container can function with, in bytes (4 MiB).
///
/// Not a kernel limit; below this a container cannot run a useful workload.
pub const LINUX_MIN_MEMORY: i64 = 4 * 1024 * 1024;

/// Lower bound of the CPU CFS period, in microseconds (1 ms).
pub const CPU_CFS_PERIOD_MIN: i64 = 1_000;

/// Upper bound of the CPU CFS period, in microseconds (1 s).
pub const CPU_CFS_PERIOD_MAX: i64 = 1_000_000;

/// Smallest CPU CFS quota, in microseconds (1 ms).
pub const CPU_CFS_QUOTA_MIN: i64 = 1_000;

/// Lower bound of the block I/O weight.
pub const BLKIO_WEIGHT_MIN: u16 = 10;

/// Upper bound of the block I/O weight.
pub const BLKIO_WEIGHT_MAX: u16 = 1_000;

/// Upper bound of the memory swappiness tunable; `-1` means unset.
pub const MEMORY_SWAPPINESS_MAX: i64 = 100;

/// Cgroup hierarchy mount point (v1 subsystem roots or the v2 unified root).
pub const CGROUP_ROOT: &str = "/sys/fs/cgroup";

/// Fallback source for the online CPU list when no cpuset controller exists.
pub const SYS_CPU_ONLINE: &str = "/sys/devices/system/cpu/online";

/// Fallback source for the online NUMA-node list.
pub const SYS_NODE_ONLINE: &str = "/sys/devices/system/node/online";
