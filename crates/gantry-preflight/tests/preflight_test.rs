//! Integration tests for the container-creation preflight.
//!
//! These tests run the full flow an orchestrator performs before
//! creating a container:
//! 1. Deserialize the create request's resource limits
//! 2. Take one capability snapshot
//! 3. Negotiate the limits against the snapshot
//! 4. Validate the volume specifications

#![allow(clippy::expect_used, clippy::unwrap_used)]

use gantry_common::types::ResourceLimits;
use gantry_common::warnings::Warnings;
use gantry_preflight::{validate_resources, validate_volumes};
use gantry_sysinfo::{Capabilities, CapabilityProbe, FakeProbe, HostProbe};

const MIB: i64 = 1024 * 1024;

#[test]
fn preflight_accepts_a_full_request_on_a_full_host() {
    let request = r#"{
        "memory": 134217728,
        "memorySwap": 268435456,
        "memoryReservation": 67108864,
        "memorySwappiness": 60,
        "pidsLimit": 512,
        "cpuShares": 1024,
        "cpuPeriod": 100000,
        "cpuQuota": 50000,
        "cpusetCpus": "0-3",
        "cpusetMems": "0",
        "blkioWeight": 300
    }"#;
    let mut limits: ResourceLimits = serde_json::from_str(request).expect("request deserializes");
    let caps = FakeProbe::full().capabilities();

    let mut warnings = Warnings::new();
    validate_resources(&mut limits, &caps, &mut warnings, false).expect("request is valid");
    assert!(warnings.is_empty());
    assert_eq!(limits.memory, 128 * MIB);
    assert_eq!(limits.cpuset_cpus, "0-3");
}

#[test]
fn preflight_negotiates_down_on_a_constrained_host() {
    let caps = FakeProbe::new(Capabilities {
        memory_limit: true,
        swap_limit: false,
        cpu_shares: true,
        cpu_cfs_period: true,
        cpu_cfs_quota: true,
        cpus: "0-1".into(),
        mems: "0".into(),
        ..Capabilities::default()
    })
    .capabilities();

    let mut limits = ResourceLimits {
        memory: 128 * MIB,
        memory_swap: 256 * MIB,
        pids_limit: 100,
        cpu_shares: 512,
        ..ResourceLimits::default()
    };
    let mut warnings = Warnings::new();
    validate_resources(&mut limits, &caps, &mut warnings, false).expect("request is negotiable");

    assert_eq!(limits.memory, 128 * MIB);
    assert_eq!(limits.memory_swap, -1);
    assert_eq!(limits.pids_limit, 0);
    assert_eq!(limits.cpu_shares, 512);
    let warnings = warnings.into_vec();
    assert_eq!(warnings.len(), 2, "got: {warnings:#?}");
    assert!(warnings[0].contains("swap"));
    assert!(warnings[1].contains("PIDs"));
}

#[test]
fn preflight_with_a_probed_snapshot() {
    // a v1-style hierarchy whose memory subsystem lacks swap accounting
    let root = tempfile::tempdir().expect("tempdir");
    for subsys in ["memory", "cpu", "cpuset", "blkio", "pids"] {
        std::fs::create_dir_all(root.path().join(subsys)).expect("mkdir");
    }
    let memory = root.path().join("memory");
    std::fs::write(memory.join("memory.limit_in_bytes"), "").expect("touch");
    std::fs::write(memory.join("memory.swappiness"), "").expect("touch");
    let cpuset = root.path().join("cpuset");
    std::fs::write(cpuset.join("cpuset.cpus"), "0-3\n").expect("write");
    std::fs::write(cpuset.join("cpuset.mems"), "0\n").expect("write");

    let caps = HostProbe::with_root(root.path()).capabilities();
    assert!(caps.memory_limit);
    assert!(!caps.swap_limit);

    let mut limits = ResourceLimits {
        memory: 64 * MIB,
        memory_swap: 128 * MIB,
        ..ResourceLimits::default()
    };
    let mut warnings = Warnings::new();
    validate_resources(&mut limits, &caps, &mut warnings, false).expect("negotiable");
    assert_eq!(limits.memory_swap, -1);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn preflight_rejects_inconsistent_requests_before_any_creation() {
    let caps = FakeProbe::full().capabilities();
    let mut limits = ResourceLimits {
        memory: 128 * MIB,
        memory_swap: 64 * MIB,
        ..ResourceLimits::default()
    };
    let mut warnings = Warnings::new();
    let err = validate_resources(&mut limits, &caps, &mut warnings, false).unwrap_err();
    assert!(err.to_string().contains("memory-swap"));
}

#[test]
fn preflight_validates_volumes_independently() {
    let host = tempfile::tempdir().expect("tempdir");
    let good = vec![format!("{}:/data:ro", host.path().display())];
    assert!(validate_volumes(&good).is_ok());

    let bad = vec![format!("{}:/data:rw,ro", host.path().display())];
    assert!(validate_volumes(&bad).is_err());
}
