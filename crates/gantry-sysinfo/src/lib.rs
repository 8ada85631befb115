//! # gantry-sysinfo
//!
//! Host capability detection for the Gantry preflight.
//!
//! The preflight validator never inspects the host directly; it consumes a
//! [`Capabilities`] snapshot describing which cgroup knobs the running
//! kernel actually offers. This crate provides:
//! - [`CapabilityProbe`]: the abstract source of a snapshot.
//! - [`HostProbe`]: the real implementation, probing the cgroup v1 or v2
//!   hierarchy through control-file existence checks.
//! - [`FakeProbe`]: a fully deterministic implementation for tests.

mod cpuset;

pub mod capabilities;
pub mod fake;
pub mod host;

pub use capabilities::Capabilities;
pub use fake::FakeProbe;
pub use host::HostProbe;

/// Source of a host capability snapshot.
///
/// A snapshot is queried once at the start of a validation call and treated
/// as immutable for the remainder of that call; it is never refreshed
/// mid-call.
pub trait CapabilityProbe {
    /// Returns the current capability snapshot.
    fn capabilities(&self) -> Capabilities;
}
