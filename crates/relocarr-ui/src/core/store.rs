//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Each slice is owned by its feature module and mutated only through the
//!   reducer helpers defined there.

use crate::core::session::SessionSlice;
use crate::features::logs::state::ActivityLog;
use crate::features::torrents::state::TorrentsState;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Authentication lifecycle state.
    pub session: SessionSlice,
    /// Torrent snapshot, view, and selection state.
    pub torrents: TorrentsState,
    /// Bounded live activity log.
    pub activity: ActivityLog,
}
