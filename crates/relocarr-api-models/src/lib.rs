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
//! Shared HTTP DTOs for the Relocarr backend API.
//!
//! The UI consumes the backend purely through this contract: a torrent
//! snapshot endpoint, two asynchronous action endpoints, and the auth/config
//! pair that doubles as the session probe. Wire field names that are
//! camelCase on the backend stay camelCase here via serde renames so the
//! contract survives round-trips byte-for-byte.

use serde::{Deserialize, Serialize};

/// Snapshot row for a single managed torrent.
///
/// `hash` is the stable identity: it is unique within a snapshot and
/// immutable across refreshes, and every piece of client state (selection,
/// row keys) is keyed on it rather than on list position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Torrent {
    /// Display name for the torrent.
    pub name: String,
    /// Stable infohash identifier.
    pub hash: String,
    /// Payload size in bytes.
    pub size: u64,
    /// Current on-disk location.
    pub save_path: String,
    /// Backend-defined status token (e.g. `downloading`, `metaDL`).
    pub state: String,
    /// Completion fraction in `0.0..=1.0`.
    pub progress: f64,
    /// Optional category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional comma-separated tag list.
    #[serde(default)]
    pub tags: Option<String>,
    /// Whether `save_path` violates the placement policy.
    #[serde(default)]
    pub misplaced: bool,
    /// Recommended destination path; only populated when `misplaced`.
    #[serde(default)]
    pub suggested_target: Option<String>,
}

/// Body of `GET /api/torrents`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TorrentList {
    /// Full torrent snapshot; every fetch replaces the previous one.
    pub items: Vec<Torrent>,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Operator account name.
    pub username: String,
    /// Operator password.
    pub password: String,
}

/// Body of `POST /api/actions/migrate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateRequest {
    /// Infohashes of the torrents to relocate.
    pub hashes: Vec<String>,
    /// Simulate the move without touching files.
    pub dry_run: bool,
    /// Remove the original source directory after a successful move.
    pub delete_old: bool,
}

/// Body of `POST /api/actions/fix-metadata`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixMetadataRequest {
    /// Infohashes of the torrents stuck fetching metadata.
    pub hashes: Vec<String>,
}

/// Task handle returned when an action is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskAccepted {
    /// Backend identifier for the spawned job, when one was created.
    #[serde(default)]
    pub task_id: Option<String>,
}

/// One container-to-host path mapping from the placement policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathMapping {
    /// Path as seen inside the download client container.
    pub container: String,
    /// Equivalent path on the host array.
    pub host: String,
}

/// Redacted configuration view returned by `GET /api/config`.
///
/// Fetching this successfully is also the session probe: a 2xx implies the
/// session cookie is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConfigView {
    /// Download client WebAPI base URL.
    #[serde(default)]
    pub qb_url: String,
    /// Placement policy path mappings.
    #[serde(default)]
    pub mappings: Vec<PathMapping>,
    /// Effective rsync flag set used for migrations.
    #[serde(default)]
    pub rsync_flags: Vec<String>,
    /// Minutes in `metaDL` before a torrent counts as stuck.
    #[serde(default)]
    pub stuck_minutes: u64,
    /// Directory receiving .torrent backups before metadata fixes.
    #[serde(default)]
    pub backup_torrent_dir: Option<String>,
    /// Concurrency cap for migration jobs.
    #[serde(default)]
    pub max_concurrent_migrations: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torrent_decodes_with_optional_fields_absent() {
        let raw = r#"{
            "name": "linux.iso",
            "hash": "abcdef1234567890",
            "size": 1073741824,
            "save_path": "/data/linux",
            "state": "uploading",
            "progress": 1.0
        }"#;
        let torrent: Torrent = serde_json::from_str(raw).unwrap();
        assert!(!torrent.misplaced);
        assert!(torrent.suggested_target.is_none());
        assert!(torrent.category.is_none());
    }

    #[test]
    fn migrate_request_uses_camel_case_on_the_wire() {
        let body = MigrateRequest {
            hashes: vec!["abc".to_string()],
            dry_run: true,
            delete_old: false,
        };
        let encoded = serde_json::to_string(&body).unwrap();
        assert!(encoded.contains("\"dryRun\":true"));
        assert!(encoded.contains("\"deleteOld\":false"));
        let decoded: MigrateRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn task_accepted_tolerates_unknown_shapes() {
        let accepted: TaskAccepted = serde_json::from_str(r#"{"taskId":"t-1"}"#).unwrap();
        assert_eq!(accepted.task_id.as_deref(), Some("t-1"));
        let bare: TaskAccepted = serde_json::from_str("{}").unwrap();
        assert!(bare.task_id.is_none());
    }

    #[test]
    fn config_view_decodes_the_redacted_shape() {
        let raw = r#"{
            "qb_url": "http://qb:8080",
            "mappings": [{"container": "/data", "host": "/mnt/user/torrents"}],
            "rsync_flags": ["-aHAX", "--partial"],
            "stuck_minutes": 10,
            "backup_torrent_dir": "/backup_torrents",
            "max_concurrent_migrations": 2
        }"#;
        let config: ConfigView = serde_json::from_str(raw).unwrap();
        assert_eq!(config.mappings.len(), 1);
        assert_eq!(config.mappings[0].host, "/mnt/user/torrents");
        assert_eq!(config.stuck_minutes, 10);
    }
}
