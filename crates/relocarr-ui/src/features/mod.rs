//! Feature slices: torrent triage and the live activity log.

pub mod logs;
pub mod torrents;
