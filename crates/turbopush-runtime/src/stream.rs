//! Async stream drain tasks (non-UTF8-safe).
//!
//! The Turbo Push binary can emit non-UTF8 bytes on stdout/stderr. Using
//! `BufReader::lines()` would terminate the reader task on invalid UTF-8,
//! so draining is done with byte-based line reads and lossy decoding.
//! Draining starts at spawn time for both streams so a pipe buffer can
//! never back up and block the child, whatever the launch outcome.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

/// Shared sink for drained lines, used to report the child's stderr when
/// a launch fails.
pub(crate) type CaptureBuffer = Arc<Mutex<String>>;

/// Read a stream to EOF in the background, logging each line and
/// optionally appending it to a capture buffer.
pub(crate) fn spawn_stream_drain(
    stream: impl AsyncRead + Unpin + Send + 'static,
    stream_type: &'static str,
    capture: Option<CaptureBuffer>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf: Vec<u8> = Vec::with_capacity(1024);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let line = decode_line(&buf);
                    debug!(%stream_type, "{}: {}", stream_type, line);
                    if let Some(ref capture) = capture {
                        let mut captured = capture.lock().unwrap();
                        if !captured.is_empty() {
                            captured.push('\n');
                        }
                        captured.push_str(&line);
                    }
                }
                Err(e) => {
                    debug!(%stream_type, error = %e, "stream drain exiting due to read error");
                    break;
                }
            }
        }

        debug!(%stream_type, "stream drain task exiting");
    })
}

/// Lossy-decode a raw line, stripping the trailing newline(s).
pub(crate) fn decode_line(buf: &[u8]) -> String {
    let mut end = buf.len();
    if end > 0 && buf[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && buf[end - 1] == b'\r' {
            end -= 1;
        }
    }
    String::from_utf8_lossy(&buf[..end]).to_string()
}
