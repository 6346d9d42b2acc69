//! Registration table and dispatch.
//!
//! The table maps api names to handlers. It is assembled once at startup by
//! [`RouterBuilder`] and frozen into a [`Router`]; after that every lookup is
//! a pure read, so a router can be shared across threads with no locking.
//!
//! Lookup is a linear scan over the registration sequence with exact,
//! case-sensitive string comparison, first match wins. Tables hold tens of
//! entries and are built once; an O(n) scan with no allocation is adequate
//! and trivially correct. Duplicates never survive to a built router —
//! [`RouterBuilder::build`] rejects them.
//!
//! # Example
//!
//! ```
//! use nodeapp_rpc::{Message, Router};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let router = Router::builder()
//!     .route_fn("app.ping", |_msg| async { Ok(None) })
//!     .build()
//!     .unwrap();
//!
//! assert!(router.resolve("app.ping").is_some());
//! assert!(router.resolve("app.pong").is_none());
//!
//! let reply = router.dispatch(Message::for_api("app.ping")).await.unwrap();
//! assert!(reply.is_none());
//! # });
//! ```

use std::future::Future;

use serde::de::DeserializeOwned;

use super::handler::{FnHandler, Handler, HandlerResult, TypedHandler};
use crate::error::{Result, RpcError};
use crate::message::Message;

/// Entry for a registered api name.
struct RouteEntry {
    /// Exact api name, dot-namespaced by convention (`"kernel.log"`).
    api_name: String,
    /// The handler invoked for this name.
    handler: Box<dyn Handler>,
}

/// Builder assembling the registration table at startup.
///
/// Registration order is preserved; validation (non-empty names, no
/// duplicates) happens in [`build`](Self::build) so a bad table fails fast
/// before the first dispatch.
#[derive(Default)]
pub struct RouterBuilder {
    entries: Vec<RouteEntry>,
}

impl RouterBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler object for an api name.
    pub fn route<H: Handler>(mut self, api_name: &str, handler: H) -> Self {
        self.entries.push(RouteEntry {
            api_name: api_name.to_string(),
            handler: Box::new(handler),
        });
        self
    }

    /// Register an async closure taking the raw [`Message`].
    pub fn route_fn<F, Fut>(self, api_name: &str, handler: F) -> Self
    where
        F: Fn(Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(api_name, FnHandler::new(handler))
    }

    /// Register an async closure taking a typed payload.
    ///
    /// The incoming message is deserialized into `T` before the closure runs.
    pub fn route_typed<F, T, Fut>(self, api_name: &str, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        T: DeserializeOwned + Send + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(api_name, TypedHandler::new(handler))
    }

    /// Validate the table and freeze it into a [`Router`].
    ///
    /// # Errors
    ///
    /// - [`RpcError::EmptyApiName`] if any entry was registered under `""`
    /// - [`RpcError::DuplicateHandler`] if two entries share a name
    pub fn build(self) -> Result<Router> {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.api_name.is_empty() {
                return Err(RpcError::EmptyApiName);
            }
            if self.entries[..i].iter().any(|e| e.api_name == entry.api_name) {
                return Err(RpcError::DuplicateHandler(entry.api_name.clone()));
            }
        }

        Ok(Router {
            entries: self.entries,
        })
    }
}

/// Immutable api-name-to-handler table.
///
/// Built once by [`RouterBuilder`], read many times. The composition root
/// owns it (typically behind an `Arc`) and injects it into whatever component
/// performs dispatch; there is no process-wide table.
pub struct Router {
    entries: Vec<RouteEntry>,
}

impl Router {
    /// Create a builder.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Resolve an api name to its handler.
    ///
    /// Exact, case-sensitive match; `None` for unknown names. Pure read with
    /// no side effects.
    pub fn resolve(&self, api_name: &str) -> Option<&dyn Handler> {
        self.entries
            .iter()
            .find(|e| e.api_name == api_name)
            .map(|e| e.handler.as_ref())
    }

    /// Number of registered api names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dispatch a message to the handler registered under its api name.
    ///
    /// Extracts the api name, resolves, and invokes. The handler call is
    /// synchronous from the router's point of view: no timeout, no
    /// cancellation, no mutual exclusion across api names. Handler errors
    /// pass through untransformed.
    ///
    /// # Errors
    ///
    /// - [`RpcError::MissingApiName`] if the message has no api field
    /// - [`RpcError::UnknownApi`] if no handler is registered for the name
    pub async fn dispatch(&self, message: Message) -> HandlerResult {
        let api_name = match message.api() {
            Some(name) => name.to_string(),
            None => return Err(RpcError::MissingApiName),
        };

        let handler = match self.resolve(&api_name) {
            Some(h) => h,
            None => {
                tracing::warn!(api = %api_name, "no handler for api name");
                return Err(RpcError::UnknownApi(api_name));
            }
        };

        tracing::debug!(api = %api_name, "dispatching message");
        handler.call(message).await
    }
}
