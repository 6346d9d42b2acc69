//! Built-in kernel api handlers.
//!
//! The embedded Node side addresses the host under the `kernel.*` namespace.
//! Only `kernel.log` has behavior here; `kernel.on-port-occupied-error` is a
//! host-defined condition report and the composition root registers its own
//! handler for that name.
//!
//! # Example
//!
//! ```
//! use nodeapp_rpc::kernel::KernelLog;
//! use nodeapp_rpc::Router;
//!
//! let router = Router::builder()
//!     .route("kernel.log", KernelLog::new())
//!     .build()
//!     .unwrap();
//! ```

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::message::Message;
use crate::router::{BoxFuture, Handler, HandlerResult};

/// Handler for `kernel.log`: forwards Node-side log lines to a diagnostic
/// stream.
///
/// Reads the `text` and `level` string fields and writes
/// `[Node <level>] <text>` plus a newline. Produces no reply. Missing fields
/// are written as empty, not treated as errors.
///
/// The sink defaults to stderr; stdout stays reserved for the control plane.
/// Writes are serialized through a mutex since the stream is shared.
pub struct KernelLog {
    sink: Arc<Mutex<dyn Write + Send>>,
}

impl KernelLog {
    /// Create a handler writing to stderr.
    pub fn new() -> Self {
        Self::with_sink(std::io::stderr())
    }

    /// Create a handler writing to the given sink.
    pub fn with_sink<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Create a handler sharing an existing sink.
    pub fn with_shared_sink(sink: Arc<Mutex<dyn Write + Send>>) -> Self {
        Self { sink }
    }
}

impl Default for KernelLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for KernelLog {
    fn call(&self, message: Message) -> BoxFuture<'static, HandlerResult> {
        let sink = self.sink.clone();
        Box::pin(async move {
            let text = message.str_field("text").unwrap_or_default();
            let level = message.str_field("level").unwrap_or_default();
            let line = format!("[Node {}] {}\n", level, text);

            let mut sink = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            sink.write_all(line.as_bytes())?;
            sink.flush()?;
            Ok(None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// In-memory sink capturing diagnostic writes.
    fn capture() -> (Arc<Mutex<Vec<u8>>>, KernelLog) {
        let buf: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink: Arc<Mutex<dyn Write + Send>> = buf.clone();
        let handler = KernelLog::with_shared_sink(sink);
        (buf, handler)
    }

    fn captured(buf: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buf.lock().unwrap().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_log_format() {
        let (buf, handler) = capture();
        let msg = Message::from_value(json!({
            "api": "kernel.log",
            "text": "hello",
            "level": "info",
        }))
        .unwrap();

        let reply = handler.call(msg).await.unwrap();
        assert!(reply.is_none());
        assert_eq!(captured(&buf), "[Node info] hello\n");
    }

    #[tokio::test]
    async fn test_missing_fields_write_empty() {
        let (buf, handler) = capture();
        let reply = handler.call(Message::for_api("kernel.log")).await.unwrap();
        assert!(reply.is_none());
        assert_eq!(captured(&buf), "[Node ] \n");
    }

    #[tokio::test]
    async fn test_multiple_lines_in_order() {
        let (buf, handler) = capture();
        for (level, text) in [("info", "one"), ("warn", "two")] {
            let msg = Message::for_api("kernel.log")
                .with_field("text", text)
                .with_field("level", level);
            handler.call(msg).await.unwrap();
        }
        assert_eq!(captured(&buf), "[Node info] one\n[Node warn] two\n");
    }
}
