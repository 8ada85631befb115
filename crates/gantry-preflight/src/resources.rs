//! Resource-limit validation and capability negotiation.
//!
//! Checks run in a fixed order and later checks observe the mutations of
//! earlier ones. For each limit the capability gate runs before the
//! numeric-range checks, so a limit discarded for lack of kernel support
//! is never range-checked afterwards; cross-limit ordering checks
//! (memory vs. swap, memory vs. reservation) run after both involved
//! limits have been through their own gates, since a downgrade can make
//! an otherwise invalid combination valid.

use gantry_common::constants::{
    BLKIO_WEIGHT_MAX, BLKIO_WEIGHT_MIN, CPU_CFS_PERIOD_MAX, CPU_CFS_PERIOD_MIN, CPU_CFS_QUOTA_MIN,
    LINUX_MIN_MEMORY, MEMORY_SWAPPINESS_MAX,
};
use gantry_common::error::{GantryError, Result};
use gantry_common::types::ResourceLimits;
use gantry_common::warnings::Warnings;
use gantry_sysinfo::Capabilities;

/// Validates a resource-limit request against a host capability snapshot.
///
/// `limits` is corrected in place: limits the host cannot enforce are
/// reset to their unset values and one warning per downgrade is appended
/// to `warnings`. The first hard failure aborts the remaining checks;
/// warnings recorded up to that point stay in the caller's sink.
///
/// `is_update` relaxes the "memory-swap requires memory" rule for
/// requests that modify an existing container, where the memory limit
/// may already be in place.
///
/// # Errors
///
/// Returns the first range or ordering violation found, a
/// [`GantryError::CpusetSyntax`] for malformed cpuset lists, or a
/// [`GantryError::CpusetUnavailable`] when the request names CPUs or
/// memory nodes the host does not have.
pub fn validate_resources(
    limits: &mut ResourceLimits,
    caps: &Capabilities,
    warnings: &mut Warnings,
    is_update: bool,
) -> Result<()> {
    tracing::debug!(is_update, "validating resource limits");
    check_memory(limits, caps, warnings, is_update)?;
    check_pids(limits, caps, warnings);
    check_cpu(limits, caps, warnings)?;
    check_cpuset(limits, caps, warnings)?;
    check_blkio(limits, caps, warnings)?;
    Ok(())
}

fn check_memory(
    limits: &mut ResourceLimits,
    caps: &Capabilities,
    warnings: &mut Warnings,
    is_update: bool,
) -> Result<()> {
    if limits.memory != 0 && limits.memory < LINUX_MIN_MEMORY {
        return Err(GantryError::MemoryBelowMinimum {
            field: "memory limit",
            requested: limits.memory,
        });
    }
    if limits.memory > 0 && !caps.memory_limit {
        warnings.push(
            "kernel does not support memory limit capabilities or the cgroup is not mounted; \
             memory limit discarded",
        );
        limits.memory = 0;
        limits.memory_swap = -1;
    }
    if limits.memory > 0 && limits.memory_swap != -1 && !caps.swap_limit {
        warnings.push(
            "kernel does not support swap limit capabilities or the cgroup is not mounted; \
             memory limited without swap",
        );
        limits.memory_swap = -1;
    }
    if limits.memory > 0 && limits.memory_swap > 0 && limits.memory_swap < limits.memory {
        return Err(GantryError::SwapBelowMemory {
            memory: limits.memory,
            memory_swap: limits.memory_swap,
        });
    }
    if limits.memory == 0 && limits.memory_swap > 0 && !is_update {
        return Err(GantryError::SwapWithoutMemory {
            memory_swap: limits.memory_swap,
        });
    }
    if limits.memory_swappiness != -1 {
        if caps.memory_swappiness {
            let swappiness = limits.memory_swappiness;
            if !(-1..=MEMORY_SWAPPINESS_MAX).contains(&swappiness) {
                return Err(GantryError::SwappinessOutOfRange {
                    requested: swappiness,
                });
            }
        } else {
            warnings.push(
                "kernel does not support memory swappiness or the cgroup is not mounted; \
                 memory swappiness discarded",
            );
            limits.memory_swappiness = -1;
        }
    }
    if limits.memory_reservation > 0 && !caps.memory_reservation {
        warnings.push(
            "kernel does not support memory soft limit capabilities or the cgroup is not \
             mounted; memory reservation discarded",
        );
        limits.memory_reservation = 0;
    }
    if limits.memory_reservation > 0 && limits.memory_reservation < LINUX_MIN_MEMORY {
        return Err(GantryError::MemoryBelowMinimum {
            field: "memory reservation",
            requested: limits.memory_reservation,
        });
    }
    if limits.memory > 0 && limits.memory_reservation > 0 && limits.memory < limits.memory_reservation
    {
        return Err(GantryError::MemoryBelowReservation {
            memory: limits.memory,
            reservation: limits.memory_reservation,
        });
    }
    if limits.kernel_memory > 0 && !caps.kernel_memory {
        warnings.push(
            "kernel does not support kernel memory limit capabilities or the cgroup is not \
             mounted; kernel memory limit discarded",
        );
        limits.kernel_memory = 0;
    }
    if limits.kernel_memory > 0 && limits.kernel_memory < LINUX_MIN_MEMORY {
        return Err(GantryError::MemoryBelowMinimum {
            field: "kernel memory limit",
            requested: limits.kernel_memory,
        });
    }
    // only an explicit request to disable the killer is worth a warning;
    // leaving it enabled needs no kernel support
    if limits.disable_oom_killer && !caps.oom_kill_disable {
        warnings.push("kernel does not support disabling the OOM killer; setting discarded");
        limits.disable_oom_killer = false;
    }
    Ok(())
}

fn check_pids(limits: &mut ResourceLimits, caps: &Capabilities, warnings: &mut Warnings) {
    if limits.pids_limit != 0 && !caps.pids_limit {
        warnings.push(
            "kernel does not support pids limit capabilities or the cgroup is not mounted; \
             PIDs limit discarded",
        );
        limits.pids_limit = 0;
    }
}

fn check_cpu(
    limits: &mut ResourceLimits,
    caps: &Capabilities,
    warnings: &mut Warnings,
) -> Result<()> {
    if limits.cpu_shares > 0 && !caps.cpu_shares {
        warnings.push(
            "kernel does not support CPU shares or the cgroup is not mounted; shares discarded",
        );
        limits.cpu_shares = 0;
    }
    if limits.cpu_period > 0 && !caps.cpu_cfs_period {
        warnings.push(
            "kernel does not support CPU cfs period or the cgroup is not mounted; \
             period discarded",
        );
        limits.cpu_period = 0;
    }
    if limits.cpu_period != 0
        && !(CPU_CFS_PERIOD_MIN..=CPU_CFS_PERIOD_MAX).contains(&limits.cpu_period)
    {
        return Err(GantryError::CpuPeriodOutOfRange {
            requested: limits.cpu_period,
        });
    }
    if limits.cpu_quota > 0 && !caps.cpu_cfs_quota {
        warnings.push(
            "kernel does not support CPU cfs quota or the cgroup is not mounted; quota discarded",
        );
        limits.cpu_quota = 0;
    }
    if limits.cpu_quota > 0 && limits.cpu_quota < CPU_CFS_QUOTA_MIN {
        return Err(GantryError::CpuQuotaBelowMinimum {
            requested: limits.cpu_quota,
        });
    }
    Ok(())
}

fn check_cpuset(
    limits: &mut ResourceLimits,
    caps: &Capabilities,
    warnings: &mut Warnings,
) -> Result<()> {
    if (!limits.cpuset_cpus.is_empty() || !limits.cpuset_mems.is_empty()) && !caps.cpuset {
        warnings.push(
            "kernel does not support cpuset or the cgroup is not mounted; cpuset discarded",
        );
        limits.cpuset_cpus.clear();
        limits.cpuset_mems.clear();
    }
    if !caps.is_cpuset_cpus_available(&limits.cpuset_cpus)? {
        return Err(GantryError::CpusetUnavailable {
            kind: "cpuset cpus",
            requested: limits.cpuset_cpus.clone(),
            available: caps.cpus.clone(),
        });
    }
    if !caps.is_cpuset_mems_available(&limits.cpuset_mems)? {
        return Err(GantryError::CpusetUnavailable {
            kind: "cpuset mems",
            requested: limits.cpuset_mems.clone(),
            available: caps.mems.clone(),
        });
    }
    Ok(())
}

fn check_blkio(
    limits: &mut ResourceLimits,
    caps: &Capabilities,
    warnings: &mut Warnings,
) -> Result<()> {
    if limits.blkio_weight > 0 && !caps.blkio_weight {
        warnings.push(
            "kernel does not support block I/O weight or the cgroup is not mounted; \
             weight discarded",
        );
        limits.blkio_weight = 0;
    }
    if limits.blkio_weight > 0
        && !(BLKIO_WEIGHT_MIN..=BLKIO_WEIGHT_MAX).contains(&limits.blkio_weight)
    {
        return Err(GantryError::BlkioWeightOutOfRange {
            requested: limits.blkio_weight,
        });
    }
    if !limits.blkio_weight_device.is_empty() && !caps.blkio_weight_device {
        warnings.push(
            "kernel does not support block I/O weight-device or the cgroup is not mounted; \
             weight-device discarded",
        );
        limits.blkio_weight_device.clear();
    }
    if !limits.device_read_bps.is_empty() && !caps.blkio_read_bps_device {
        warnings.push(
            "kernel does not support BPS block I/O read limit or the cgroup is not mounted; \
             block I/O BPS read limit discarded",
        );
        limits.device_read_bps.clear();
    }
    if !limits.device_write_bps.is_empty() && !caps.blkio_write_bps_device {
        warnings.push(
            "kernel does not support BPS block I/O write limit or the cgroup is not mounted; \
             block I/O BPS write limit discarded",
        );
        limits.device_write_bps.clear();
    }
    if !limits.device_read_iops.is_empty() && !caps.blkio_read_iops_device {
        warnings.push(
            "kernel does not support IOPS block I/O read limit or the cgroup is not mounted; \
             block I/O IOPS read limit discarded",
        );
        limits.device_read_iops.clear();
    }
    if !limits.device_write_iops.is_empty() && !caps.blkio_write_iops_device {
        warnings.push(
            "kernel does not support IOPS block I/O write limit or the cgroup is not mounted; \
             block I/O IOPS write limit discarded",
        );
        limits.device_write_iops.clear();
    }
    Ok(())
}
