//! Router module - handler registration and dispatch.
//!
//! Provides:
//! - [`RouterBuilder`] - startup-time registration of api handlers
//! - [`Router`] - immutable table resolving api names to handlers
//! - [`Handler`] - the contract a handler implements
//!
//! # Example
//!
//! ```ignore
//! use nodeapp_rpc::router::Router;
//!
//! let router = Router::builder()
//!     .route_fn("app.ping", |_msg| async { Ok(None) })
//!     .route_typed("app.greet", |payload: Greeting| async move {
//!         Ok(Some(Message::for_api("app.greeted")
//!             .with_field("text", format!("hi {}", payload.name))))
//!     })
//!     .build()?;
//!
//! let reply = router.dispatch(msg).await?;
//! ```

mod handler;
mod registry;

pub use handler::{BoxFuture, FnHandler, Handler, HandlerResult, TypedHandler};
pub use registry::{Router, RouterBuilder};
