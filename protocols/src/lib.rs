//! Driver-side implementations of the `tagcrawl` protocol port.
//!
//! The controller wire protocol itself lives outside this workspace. What
//! lives here is [`sim::SimulatedPlc`], an in-memory controller used by the
//! binary's `--device` profiles and by every test, and the
//! [`profile::DeviceProfile`] file format it is loaded from.

pub mod profile;
pub mod sim;

pub use profile::{DeviceProfile, ProfileError};
pub use sim::SimulatedPlc;

/// Primitive type names reported by the supported controller family.
pub const STANDARD_PRIMITIVES: &[&str] = &[
    "BOOL", "SINT", "INT", "DINT", "LINT", "USINT", "UINT", "UDINT", "LWORD", "REAL", "LREAL",
    "DWORD", "STRING",
];
