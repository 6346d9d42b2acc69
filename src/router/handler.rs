//! Handler contract.
//!
//! A handler receives exactly one [`Message`], may read any subset of its
//! fields, performs arbitrary side effects, and returns zero or one reply
//! message. Errors raised inside a handler are the handler's own; the router
//! passes them through without catching or transforming them.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::message::Message;

/// Result type for handler invocations: an optional reply message.
pub type HandlerResult = Result<Option<Message>>;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for api handlers.
///
/// Handlers may carry internal state (a logger, a script engine binding);
/// they must be shareable across tasks since a built [`super::Router`] is.
pub trait Handler: Send + Sync + 'static {
    /// Handle a single request message.
    fn call(&self, message: Message) -> BoxFuture<'static, HandlerResult>;
}

/// Adapter turning a plain async closure into a [`Handler`].
pub struct FnHandler<F> {
    handler: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Message) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    /// Wrap a closure.
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Message) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, message: Message) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self.handler)(message))
    }
}

/// Wrapper that deserializes the message into a typed payload before calling
/// the handler.
///
/// Declare optional fields as `Option<T>` on the payload struct; fields the
/// handler does not declare are ignored.
pub struct TypedHandler<F, T, Fut>
where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    T: DeserializeOwned + Send + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    handler: F,
    _phantom: PhantomData<fn(T) -> Fut>,
}

impl<F, T, Fut> TypedHandler<F, T, Fut>
where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    T: DeserializeOwned + Send + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    /// Create a new typed handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, T, Fut> Handler for TypedHandler<F, T, Fut>
where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    T: DeserializeOwned + Send + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, message: Message) -> BoxFuture<'static, HandlerResult> {
        let parsed: T = match serde_json::from_value(message.into_value()) {
            Ok(v) => v,
            Err(e) => return Box::pin(async move { Err(e.into()) }),
        };

        let fut = (self.handler)(parsed);
        Box::pin(fut)
    }
}
