//! # tagcrawl core
//!
//! Discovery and read/write orchestration against a controller reached
//! through the [`ProtocolDriver`](tagcrawl_common::driver::ProtocolDriver) port.
//!
//! Every hardware-touching operation on [`TagService`] runs the same
//! [`precheck`](TagService::precheck) gate first (address syntax, liveness,
//! device class) and then works inside one session that it opens and closes
//! itself.
//!
//! * [`catalog`]: tag namespace discovery and composite type flattening.
//! * [`reader`]: bounded per-tag reads with partial-failure tolerance.
//! * [`writer`]: batch writes with per-tag outcomes.
//! * [`snapshot`]: discovery followed by a read pass.
//! * [`clock`]: controller wall clock.
//! * [`tabular`]: spreadsheet text in and out.

pub mod catalog;
pub mod clock;
pub mod network;
pub mod precheck;
pub mod reader;
pub mod service;
pub mod snapshot;
pub mod tabular;
pub mod writer;

pub use service::TagService;
