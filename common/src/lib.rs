//! Shared models and boundaries for `tagcrawl`.
//!
//! * **[`plc`]**: tag, address and composite-type models.
//! * **[`driver`]**: the protocol driver port the core talks through.
//! * **[`reachability`]**: the liveness probe port.
//! * **[`error`]**: the error taxonomy surfaced to callers.

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod plc;
pub mod progress;
pub mod reachability;

pub use tracing;
