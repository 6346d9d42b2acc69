//! # nodeapp-rpc
//!
//! In-process message router between a host shell and embedded Node script
//! logic speaking a JSON-like message protocol.
//!
//! The host decodes a request off the wire (framing and codec are someone
//! else's job), wraps it in a [`Message`], and hands it to a [`Router`]. The
//! router looks up the handler registered under the message's api name and
//! invokes it, returning the handler's optional reply. Unknown api names are
//! a normal outcome reported as [`RpcError::UnknownApi`], never a crash.
//!
//! The registration table is built once at startup through [`RouterBuilder`]
//! and immutable afterwards, so a `Router` can be shared across tasks behind
//! an `Arc` with no locking.
//!
//! ## Example
//!
//! ```ignore
//! use nodeapp_rpc::{kernel::KernelLog, Message, Router};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> nodeapp_rpc::Result<()> {
//!     let router = Router::builder()
//!         .route("kernel.log", KernelLog::new())
//!         .route_fn("app.ping", |_msg| async { Ok(None) })
//!         .build()?;
//!
//!     let msg = Message::from_value(json!({
//!         "api": "kernel.log",
//!         "text": "hello",
//!         "level": "info",
//!     }))?;
//!     let reply = router.dispatch(msg).await?;
//!     assert!(reply.is_none());
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod error;
pub mod kernel;
pub mod message;
pub mod router;

pub use error::{Result, RpcError};
pub use message::Message;
pub use router::{Handler, HandlerResult, Router, RouterBuilder};
