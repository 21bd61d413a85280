//! Wire payloads for the Relocarr activity stream.
//!
//! While migrate and fix-metadata jobs run, the backend publishes JSON
//! payloads over its SSE endpoint. Two shapes are in circulation: raw
//! passthrough lines (rsync output and command echoes) and structured job
//! entries carrying an optional severity and subject torrent. Anything else
//! on the stream (heartbeat comments, keepalive frames, task bookkeeping) is
//! not a log payload and must be discarded without surfacing an error.

use serde::{Deserialize, Serialize};

/// Number of hash characters carried into a rendered log line.
pub const HASH_PREFIX_LEN: usize = 8;

/// A decoded payload from the activity stream.
///
/// Decoding attempts the variants in declaration order: a payload carrying a
/// `line` field is a raw passthrough even when other fields are present; a
/// payload with a `message` field is a structured entry; everything else
/// fails to decode and is dropped by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamPayload {
    /// Raw passthrough line, forwarded verbatim.
    Raw {
        /// The line exactly as the backend emitted it.
        line: String,
    },
    /// Structured job entry.
    Entry {
        /// Severity token (`info`, `warn`, `error`) when the backend set one.
        #[serde(default)]
        level: Option<String>,
        /// Infohash of the torrent the entry concerns, when applicable.
        #[serde(default)]
        hash: Option<String>,
        /// Human-readable entry text.
        message: String,
    },
}

/// Failure to interpret stream data as a [`StreamPayload`].
///
/// Carries the offending data so transports can log it at debug level;
/// consumers otherwise treat it as a keepalive and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Raw frame data that matched no payload shape.
    pub data: String,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognised stream payload: {}", self.data)
    }
}

impl std::error::Error for DecodeError {}

/// Decode one frame's data into a payload.
///
/// # Errors
/// Returns [`DecodeError`] when the data is not JSON or matches neither
/// payload shape.
pub fn decode_payload(data: &str) -> Result<StreamPayload, DecodeError> {
    serde_json::from_str(data).map_err(|_| DecodeError {
        data: data.to_string(),
    })
}

/// Render a payload as a display line.
///
/// Structured entries are prefixed with the first [`HASH_PREFIX_LEN`]
/// characters of the hash and the bracketed severity, each followed by a
/// single space, when present and non-empty.
#[must_use]
pub fn render_line(payload: &StreamPayload) -> String {
    match payload {
        StreamPayload::Raw { line } => line.clone(),
        StreamPayload::Entry {
            level,
            hash,
            message,
        } => {
            let mut out = String::new();
            if let Some(hash) = hash.as_deref().filter(|h| !h.is_empty()) {
                out.extend(hash.chars().take(HASH_PREFIX_LEN));
                out.push(' ');
            }
            if let Some(level) = level.as_deref().filter(|l| !l.is_empty()) {
                out.push('[');
                out.push_str(level);
                out.push_str("] ");
            }
            out.push_str(message);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_payload_takes_precedence() {
        let payload = decode_payload(r#"{"line":"rsync: 42%","message":"ignored"}"#).unwrap();
        assert_eq!(
            payload,
            StreamPayload::Raw {
                line: "rsync: 42%".to_string()
            }
        );
        assert_eq!(render_line(&payload), "rsync: 42%");
    }

    #[test]
    fn entry_renders_hash_prefix_and_level() {
        let payload =
            decode_payload(r#"{"hash":"abcdef1234567890","level":"warn","message":"moved file"}"#)
                .unwrap();
        assert_eq!(render_line(&payload), "abcdef12 [warn] moved file");
    }

    #[test]
    fn entry_renders_without_optional_fields() {
        let payload = decode_payload(r#"{"taskId":"t1","message":"Starting migrate"}"#).unwrap();
        assert_eq!(render_line(&payload), "Starting migrate");
        let hash_only = decode_payload(r#"{"hash":"0123456789ab","message":"recheck"}"#).unwrap();
        assert_eq!(render_line(&hash_only), "01234567 recheck");
    }

    #[test]
    fn empty_hash_and_level_are_treated_as_absent() {
        let payload = decode_payload(r#"{"hash":"","level":"","message":"resume"}"#).unwrap();
        assert_eq!(render_line(&payload), "resume");
    }

    #[test]
    fn keepalives_and_bookkeeping_fail_to_decode() {
        assert!(decode_payload(": heartbeat 1700000000").is_err());
        assert!(decode_payload("not json").is_err());
        assert!(decode_payload(r#"{"taskId":"t1","success":true}"#).is_err());
        assert!(decode_payload("[1,2,3]").is_err());
    }
}
