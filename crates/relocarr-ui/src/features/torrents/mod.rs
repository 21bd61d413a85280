//! Torrent triage feature slice.
//!
//! # Design
//! - Keep snapshot, view derivation, and selection as pure state helpers so
//!   they run in native tests.
//! - Keep the bulk-action gate separate from transport concerns.

pub mod actions;
pub mod state;

#[cfg(target_arch = "wasm32")]
pub mod view;
