//! Transport helpers: the SSE frame parser and the REST client.

#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod sse;
