//! promsim server library entry.
//!
//! This crate wires config, the metrics registry, the instrumentation
//! middleware, the HTTP handlers and the periodic sampler into one service.
//! It is consumed by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod process;
pub mod router;
pub mod sampler;
pub mod transport;
