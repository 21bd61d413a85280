//! SSE frame parser (transport-only).
//!
//! # Design
//! - Accept partial chunks and emit complete frames when a blank line is
//!   received.
//! - Keep this module DOM-free so it runs in native tests.
//! - Comment lines (leading `:`) are the keepalive heartbeat; they are
//!   consumed and never surface as frames.

/// Parsed SSE frame.
///
/// The named channel (`event:`) and frame id are captured for completeness,
/// but the activity stream treats every channel identically, so consumers
/// normally read only `data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SseFrame {
    /// Optional event name.
    pub event: Option<String>,
    /// Optional event id.
    pub id: Option<String>,
    /// Concatenated data payload.
    pub data: String,
}

impl SseFrame {
    fn is_empty(&self) -> bool {
        self.event.is_none() && self.id.is_none() && self.data.is_empty()
    }
}

/// Incremental SSE parser for streamed chunks.
#[derive(Default)]
pub struct SseParser {
    line: String,
    pending_cr: bool,
    builder: FrameBuilder,
}

impl SseParser {
    /// Feed a chunk of stream text; returns every frame completed by it.
    pub fn push(&mut self, chunk: &str) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        for ch in chunk.chars() {
            if self.pending_cr {
                self.pending_cr = false;
                if ch == '\n' {
                    continue;
                }
            }
            match ch {
                '\n' => self.finish_line(&mut frames),
                '\r' => {
                    self.pending_cr = true;
                    self.finish_line(&mut frames);
                }
                _ => self.line.push(ch),
            }
        }
        frames
    }

    /// Flush any trailing frame when the stream ends.
    pub fn finish(&mut self) -> Option<SseFrame> {
        if !self.line.is_empty() {
            self.finish_line(&mut Vec::new());
        }
        self.builder.take_frame()
    }

    fn finish_line(&mut self, frames: &mut Vec<SseFrame>) {
        let line = self.line.clone();
        self.line.clear();
        if line.is_empty() {
            if let Some(frame) = self.builder.take_frame() {
                frames.push(frame);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }
        let (field, value) = line
            .split_once(':')
            .map(|(field, value)| (field, value.strip_prefix(' ').unwrap_or(value)))
            .unwrap_or((line.as_str(), ""));
        self.builder.apply_field(field, value);
    }
}

#[derive(Default)]
struct FrameBuilder {
    event: Option<String>,
    id: Option<String>,
    data: String,
}

impl FrameBuilder {
    fn apply_field(&mut self, field: &str, value: &str) {
        match field {
            "event" => self.event = Some(value.to_string()),
            "id" => self.id = Some(value.to_string()),
            "data" => {
                if !self.data.is_empty() {
                    self.data.push('\n');
                }
                self.data.push_str(value);
            }
            _ => {}
        }
    }

    fn take_frame(&mut self) -> Option<SseFrame> {
        let frame = SseFrame {
            event: self.event.take(),
            id: self.id.take(),
            data: std::mem::take(&mut self.data),
        };
        if frame.is_empty() { None } else { Some(frame) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_emits_frames_on_blank_lines() {
        let mut parser = SseParser::default();
        let input = "event: state\ndata: hello\n\nid: 42\ndata: world\n\n";
        let frames = parser.push(input);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].event.as_deref(), Some("state"));
        assert_eq!(frames[0].data, "hello");
        assert_eq!(frames[1].id.as_deref(), Some("42"));
        assert_eq!(frames[1].data, "world");
    }

    #[test]
    fn parser_joins_multi_line_data() {
        let mut parser = SseParser::default();
        let frames = parser.push("data: line1\ndata: line2\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "line1\nline2");
    }

    #[test]
    fn heartbeat_comments_never_surface() {
        let mut parser = SseParser::default();
        let frames = parser.push(": heartbeat 1700000000\n\n: another\n\n");
        assert!(frames.is_empty());
        assert!(parser.finish().is_none());
    }

    #[test]
    fn crlf_terminators_parse_like_bare_newlines() {
        let mut parser = SseParser::default();
        let frames = parser.push("event: progress\r\ndata: 42%\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event.as_deref(), Some("progress"));
        assert_eq!(frames[0].data, "42%");
    }

    #[test]
    fn split_chunks_reassemble_into_one_frame() {
        let mut parser = SseParser::default();
        assert!(parser.push("data: par").is_empty());
        let frames = parser.push("tial\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "partial");
    }

    #[test]
    fn finish_flushes_a_trailing_frame() {
        let mut parser = SseParser::default();
        assert!(parser.push("data: tail").is_empty());
        let frame = parser.finish().unwrap();
        assert_eq!(frame.data, "tail");
    }
}
