//! Live event stream runner.
//!
//! # Design
//! - Use fetch streaming so the session cookie rides the request.
//! - Reconnect after a fixed 1.5 s delay, forever. The stream carries
//!   surfaced log content, not transactional state, so liveness wins over
//!   escalation; the delay never grows and attempts are unbounded.
//! - Expose a cancellable handle; closing it aborts the in-flight fetch and
//!   the abort re-check after every sleep stops pending reconnects.

use crate::services::sse::{SseFrame, SseParser};
use gloo::console;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, ReadableStream, ReadableStreamDefaultReader, Request,
    RequestCredentials, RequestInit, Response,
};
use yew::Callback;

const RECONNECT_DELAY_MS: u32 = 1_500;

const STREAM_PATH: &str = "/api/events/stream";

/// Active event stream handle; closing is idempotent.
pub(crate) struct EventStreamHandle {
    controller: AbortController,
}

impl EventStreamHandle {
    pub(crate) fn close(&self) {
        self.controller.abort();
    }
}

/// Spawn the stream loop and return a cancellable handle.
///
/// Every complete frame's data is forwarded to `on_frame`; the named channel
/// is ignored because all channels carry the same payload shapes.
pub(crate) fn connect_events(on_frame: Callback<String>) -> Option<EventStreamHandle> {
    let controller = AbortController::new().ok()?;
    let signal = controller.signal();
    yew::platform::spawn_local(async move {
        run_stream_loop(signal, on_frame).await;
    });
    Some(EventStreamHandle { controller })
}

async fn run_stream_loop(signal: AbortSignal, on_frame: Callback<String>) {
    loop {
        if signal.aborted() {
            break;
        }

        match open_stream(&signal).await {
            Ok(mut reader) => {
                let mut parser = SseParser::default();
                loop {
                    if signal.aborted() {
                        return;
                    }
                    match read_chunk(&mut reader).await {
                        Ok(Some(bytes)) => {
                            let text = String::from_utf8_lossy(&bytes.to_vec()).into_owned();
                            for frame in parser.push(&text) {
                                emit_frame(&on_frame, &frame);
                            }
                        }
                        Ok(None) => {
                            if let Some(frame) = parser.finish() {
                                emit_frame(&on_frame, &frame);
                            }
                            break;
                        }
                        Err(err) => {
                            console::debug!("event stream read failed", err);
                            break;
                        }
                    }
                }
            }
            Err(err) => {
                console::debug!("event stream connect failed", err.to_string());
            }
        }

        TimeoutFuture::new(RECONNECT_DELAY_MS).await;
    }
}

fn emit_frame(on_frame: &Callback<String>, frame: &SseFrame) {
    let data = frame.data.trim();
    if !data.is_empty() {
        on_frame.emit(data.to_string());
    }
}

async fn open_stream(signal: &AbortSignal) -> Result<ReadableStreamDefaultReader, ConnectError> {
    let window = web_sys::window().ok_or(ConnectError::Window)?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_credentials(RequestCredentials::Include);
    init.set_signal(Some(signal));

    let request =
        Request::new_with_str_and_init(STREAM_PATH, &init).map_err(|_| ConnectError::Request)?;
    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| ConnectError::Fetch)?;
    let response: Response = resp.dyn_into().map_err(|_| ConnectError::Fetch)?;
    if !response.ok() {
        return Err(ConnectError::Status(response.status()));
    }
    let stream: ReadableStream = response.body().ok_or(ConnectError::Stream)?;
    let reader = stream
        .get_reader()
        .dyn_into::<ReadableStreamDefaultReader>()
        .map_err(|_| ConnectError::Reader)?;
    Ok(reader)
}

async fn read_chunk(
    reader: &mut ReadableStreamDefaultReader,
) -> Result<Option<Uint8Array>, String> {
    let chunk = JsFuture::from(reader.read())
        .await
        .map_err(|err| format!("read failed: {err:?}"))?;
    let done = Reflect::get(&chunk, &JsValue::from_str("done"))
        .map_err(|err| format!("chunk done lookup failed: {err:?}"))?
        .as_bool()
        .unwrap_or(false);
    if done {
        return Ok(None);
    }
    let value = Reflect::get(&chunk, &JsValue::from_str("value"))
        .map_err(|err| format!("chunk value lookup failed: {err:?}"))?;
    Ok(Some(Uint8Array::new(&value)))
}

#[derive(Debug)]
enum ConnectError {
    Window,
    Request,
    Fetch,
    Status(u16),
    Stream,
    Reader,
}

impl std::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectError::Window => write!(f, "browser window unavailable"),
            ConnectError::Request => write!(f, "failed to construct request"),
            ConnectError::Fetch => write!(f, "fetch failed"),
            ConnectError::Status(code) => write!(f, "unexpected status {code}"),
            ConnectError::Stream => write!(f, "response stream missing"),
            ConnectError::Reader => write!(f, "failed to read response stream"),
        }
    }
}
