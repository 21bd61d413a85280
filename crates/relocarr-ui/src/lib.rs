#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Relocarr operator console.
//!
//! Yew front-end for the torrent placement backend: triage tabs over the
//! torrent snapshot, bulk migrate/fix-metadata actions behind a typed
//! confirmation gate, and a live activity log fed by the backend event
//! stream. Pure state modules are DOM-free and tested on the native target;
//! everything that touches the browser is gated behind `wasm32`.

pub mod core;
pub mod features;
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
