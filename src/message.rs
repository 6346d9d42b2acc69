//! Decoded request/response payloads.
//!
//! A [`Message`] is an opaque associative structure: string keys mapped to
//! JSON values (strings, numbers, booleans, nested structures, null). Inbound
//! messages carry an `api` field naming the handler they are routed to,
//! dot-namespaced by convention (`"kernel.log"`); every other field is
//! handler-specific. Reading a field that is not present yields `None`, never
//! an error.
//!
//! # Example
//!
//! ```
//! use nodeapp_rpc::Message;
//! use serde_json::json;
//!
//! let msg = Message::from_value(json!({
//!     "api": "kernel.log",
//!     "text": "hello",
//!     "level": "info",
//! })).unwrap();
//!
//! assert_eq!(msg.api(), Some("kernel.log"));
//! assert_eq!(msg.str_field("text"), Some("hello"));
//! assert_eq!(msg.str_field("missing"), None);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, RpcError};

/// Field that names the handler a message is routed to.
pub const API_FIELD: &str = "api";

/// A decoded request or response payload.
///
/// Owned exclusively by the caller that constructs it, passed into exactly
/// one handler call, and discarded after the caller consumes the optional
/// reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message {
    fields: Map<String, Value>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message addressed to the given api name.
    pub fn for_api(api_name: &str) -> Self {
        let mut msg = Self::new();
        msg.fields
            .insert(API_FIELD.to_string(), Value::String(api_name.to_string()));
        msg
    }

    /// Wrap a decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(RpcError::Json)
    }

    /// The api name this message is routed by, if present.
    pub fn api(&self) -> Option<&str> {
        self.str_field(API_FIELD)
    }

    /// Get a field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a field as a string. Absent or non-string fields yield `None`.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Set a field, returning self for chaining.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Insert a field.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the message carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the message, yielding the underlying JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Borrow the underlying field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for Message {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_object() {
        let msg = Message::from_value(json!({"api": "kernel.log", "text": "hi"})).unwrap();
        assert_eq!(msg.api(), Some("kernel.log"));
        assert_eq!(msg.str_field("text"), Some("hi"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(Message::from_value(json!([1, 2, 3])).is_err());
        assert!(Message::from_value(json!("kernel.log")).is_err());
    }

    #[test]
    fn test_missing_field_is_absent() {
        let msg = Message::for_api("kernel.log");
        assert_eq!(msg.str_field("text"), None);
        assert_eq!(msg.get("text"), None);
    }

    #[test]
    fn test_non_string_field_reads_as_absent_string() {
        let msg = Message::from_value(json!({"api": "a.b", "count": 3})).unwrap();
        assert_eq!(msg.str_field("count"), None);
        assert_eq!(msg.get("count"), Some(&json!(3)));
    }

    #[test]
    fn test_builder_chaining() {
        let msg = Message::for_api("app.save")
            .with_field("path", "/tmp/x")
            .with_field("dirty", true);
        assert_eq!(msg.api(), Some("app.save"));
        assert_eq!(msg.str_field("path"), Some("/tmp/x"));
        assert_eq!(msg.get("dirty"), Some(&json!(true)));
        assert_eq!(msg.len(), 3);
    }

    #[test]
    fn test_round_trip_value() {
        let value = json!({"api": "a.b", "nested": {"k": null}});
        let msg = Message::from_value(value.clone()).unwrap();
        assert_eq!(msg.into_value(), value);
    }
}
