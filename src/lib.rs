//! skycast-rs - workspace facade over [`skycast_core`].
//!
//! Demos and dev tooling depend on this crate; libraries should depend on
//! `skycast-core` directly.

pub use skycast_core::*;
