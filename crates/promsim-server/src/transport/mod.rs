//! HTTP transport layer concerns that wrap every route.

pub mod instrument;
