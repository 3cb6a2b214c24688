//! promsim core: transport-agnostic primitives shared by the server and tests.
//!
//! This crate defines the error surface and the scenario lookup table. It
//! carries no runtime or HTTP dependencies so the scenario contract can be
//! reasoned about (and tested) without booting a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `DemoError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod scenario;

/// Shared result type.
pub use error::{Result, DemoError};
pub use scenario::Scenario;
