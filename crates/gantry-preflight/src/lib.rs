//! # gantry-preflight
//!
//! Container-creation preflight validation.
//!
//! Two independent validators run before any container is created:
//! - [`resources::validate_resources`] checks a [`gantry_common::types::ResourceLimits`]
//!   request against the host capability snapshot, hard-failing on
//!   inconsistent or out-of-range values and silently downgrading limits
//!   the kernel cannot enforce (recording one warning per downgrade).
//! - [`volumes::validate_volumes`] parses and checks raw
//!   `host-dir:ctr-dir[:options]` volume specifications.
//!
//! Neither validator depends on the other; the orchestrator calls both
//! and aborts creation on the first hard error.

pub mod resources;
pub mod sysctl;
pub mod volumes;

pub use resources::validate_resources;
pub use sysctl::parse_sysctls;
pub use volumes::{VolumeSpec, validate_volumes};
