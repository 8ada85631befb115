//! Unified error types for the Gantry workspace.
//!
//! Every hard validation failure is a [`GantryError`] variant carrying the
//! offending field and the requested value, so callers can render an
//! actionable message without re-parsing the request. Capability
//! downgrades are not errors; they surface through
//! [`crate::warnings::Warnings`].

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum GantryError {
    /// A memory-class limit was set below the 4 MiB functional minimum.
    #[error("minimum {field} allowed is 4MB, requested {requested} bytes")]
    MemoryBelowMinimum {
        /// Which limit was too small (`memory limit`, `memory reservation`,
        /// or `kernel memory limit`).
        field: &'static str,
        /// Requested value in bytes.
        requested: i64,
    },

    /// The memory-swap limit does not cover the memory limit.
    #[error("memory-swap limit {memory_swap} must be larger than the memory limit {memory}")]
    SwapBelowMemory {
        /// Requested memory limit in bytes.
        memory: i64,
        /// Requested memory-swap limit in bytes.
        memory_swap: i64,
    },

    /// A memory-swap limit was requested without a memory limit.
    #[error("memory-swap limit {memory_swap} requires the memory limit to be set as well")]
    SwapWithoutMemory {
        /// Requested memory-swap limit in bytes.
        memory_swap: i64,
    },

    /// The memory swappiness tunable is outside its legal range.
    #[error("invalid memory swappiness {requested}: valid range is 0-100")]
    SwappinessOutOfRange {
        /// Requested swappiness value.
        requested: i64,
    },

    /// The memory limit is smaller than the memory reservation.
    #[error("memory limit {memory} cannot be less than the memory reservation {reservation}")]
    MemoryBelowReservation {
        /// Requested memory limit in bytes.
        memory: i64,
        /// Requested memory reservation in bytes.
        reservation: i64,
    },

    /// The CPU CFS period is outside the 1ms–1s window.
    #[error("CPU cfs period {requested} out of range: cannot be less than 1ms (i.e. 1000) or larger than 1s (i.e. 1000000)")]
    CpuPeriodOutOfRange {
        /// Requested period in microseconds.
        requested: i64,
    },

    /// The CPU CFS quota is below the 1ms floor.
    #[error("CPU cfs quota {requested} cannot be less than 1ms (i.e. 1000)")]
    CpuQuotaBelowMinimum {
        /// Requested quota in microseconds.
        requested: i64,
    },

    /// The block I/O weight is outside its legal range.
    #[error("block I/O weight {requested} out of range: valid range is 10 to 1000")]
    BlkioWeightOutOfRange {
        /// Requested weight.
        requested: u16,
    },

    /// A cpuset list string does not follow the kernel list syntax.
    #[error("invalid value {requested:?} for {kind}")]
    CpusetSyntax {
        /// Which list was malformed (`cpuset cpus` or `cpuset mems`).
        kind: &'static str,
        /// The malformed list string.
        requested: String,
    },

    /// A requested cpuset is not a subset of what the host offers.
    #[error("requested {kind} are not available: requested {requested:?}, available {available:?}")]
    CpusetUnavailable {
        /// Which resource was requested (`cpuset cpus` or `cpuset mems`).
        kind: &'static str,
        /// The requested list string.
        requested: String,
        /// The host's available list string.
        available: String,
    },

    /// A volume specification does not split into host and container parts.
    #[error("incorrect volume format {spec:?}, should be host-dir:ctr-dir[:options]")]
    VolumeFormat {
        /// The raw volume specification.
        spec: String,
    },

    /// The volume host path could not be checked.
    #[error("error checking volume host path {path:?}: {source}")]
    VolumeHostPath {
        /// The host path that failed the existence check.
        path: String,
        /// Underlying filesystem error.
        source: std::io::Error,
    },

    /// The volume container path is not absolute.
    #[error("invalid container directory path {path:?}: must be absolute")]
    VolumeContainerPath {
        /// The offending container path.
        path: String,
    },

    /// A volume option token is not recognized.
    #[error("invalid volume option {option:?}")]
    VolumeOptionUnknown {
        /// The unrecognized option token.
        option: String,
    },

    /// Two volume options from the same mutually exclusive group.
    #[error("invalid volume options {options:?}: can only specify one {group} option")]
    VolumeOptionConflict {
        /// The full option list as given.
        options: String,
        /// Human-readable name of the violated group.
        group: &'static str,
    },

    /// A sysctl entry is missing its `key=value` delimiter.
    #[error("invalid sysctl entry {entry:?}, expected key=value")]
    SysctlFormat {
        /// The malformed entry.
        entry: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GantryError>;
