//! Preflight negotiation against the real host.
//!
//! Probes the local cgroup hierarchy, validates a sample create request
//! against it, and reports every downgrade the host forced.
//!
//! Run with:
//! ```bash
//! cargo run --example preflight
//! ```

use gantry_common::types::ResourceLimits;
use gantry_common::warnings::Warnings;
use gantry_preflight::{validate_resources, validate_volumes};
use gantry_sysinfo::{CapabilityProbe, HostProbe};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let caps = HostProbe::new().capabilities();
    tracing::info!(
        memory = caps.memory_limit,
        swap = caps.swap_limit,
        cpuset = caps.cpuset,
        cpus = %caps.cpus,
        "host capability snapshot"
    );

    let mut limits = ResourceLimits {
        memory: 128 * 1024 * 1024,
        memory_swap: 256 * 1024 * 1024,
        memory_swappiness: 60,
        pids_limit: 256,
        cpu_shares: 512,
        blkio_weight: 300,
        ..ResourceLimits::default()
    };

    let mut warnings = Warnings::new();
    validate_resources(&mut limits, &caps, &mut warnings, false)?;
    tracing::info!(
        memory = limits.memory,
        memory_swap = limits.memory_swap,
        downgrades = warnings.len(),
        "resource limits negotiated"
    );
    for warning in warnings.as_slice() {
        tracing::info!("downgrade: {warning}");
    }

    let volumes = vec!["/tmp:/data:rw".to_owned()];
    validate_volumes(&volumes)?;
    tracing::info!("volume specifications valid");

    Ok(())
}
