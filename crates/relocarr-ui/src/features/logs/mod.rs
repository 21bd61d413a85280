//! Live activity log feature slice.
//!
//! # Design
//! - Keep the bounded buffer and ingest rules in a pure state module.
//! - Render an append-only, newest-first view for operators.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub mod view;
