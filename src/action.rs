//! Script action collaborator contract.
//!
//! The host's GUI data model has "action" objects backed by user scripts.
//! Their internals (presentation, script engine, persistence format) are not
//! this crate's business; the router only needs enough of an interface to
//! wrap one as an api handler. [`Action`] is that interface and
//! [`ActionHandler`] is the wrapper.
//!
//! Persistence is an opaque key-value [`Memento`]; the action restores itself
//! from one when loaded and writes itself back into one when saved.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::message::Message;
use crate::router::{BoxFuture, Handler, HandlerResult};

/// Opaque key-value mapping an action persists itself through.
pub type Memento = Map<String, Value>;

/// Contract for a scripted GUI action.
pub trait Action: Send + Sync + 'static {
    /// Stable identifier of the action type, used as the memento's type tag.
    fn type_identifier(&self) -> &str;

    /// Restore state from a memento. Invoked automatically when reading.
    fn load_memento(&mut self, memento: &Memento);

    /// Write state into a memento.
    fn update_memento(&self, memento: &mut Memento);

    /// Whether the user has enabled this action.
    fn enabled(&self) -> bool;

    /// Whether the action has meaningful content worth invoking or saving.
    fn is_non_empty(&self) -> bool;

    /// Run the action against a project.
    ///
    /// Completes with `Ok(())` on success; failures surface as
    /// [`RpcError::Script`](crate::RpcError::Script).
    fn invoke(
        &self,
        project_path: PathBuf,
        modified_files: HashSet<PathBuf>,
    ) -> BoxFuture<'static, Result<()>>;
}

/// Adapter exposing an [`Action`] as an api handler.
///
/// Reads `projectPath` (string) and `paths` (array of strings) from the
/// incoming message; absent fields read as empty. Disabled or empty actions
/// are skipped silently. Produces no reply; invoke failures propagate to the
/// dispatcher untransformed.
pub struct ActionHandler {
    action: Arc<dyn Action>,
}

impl ActionHandler {
    /// Wrap an action.
    pub fn new(action: Arc<dyn Action>) -> Self {
        Self { action }
    }
}

impl Handler for ActionHandler {
    fn call(&self, message: Message) -> BoxFuture<'static, HandlerResult> {
        let action = self.action.clone();
        Box::pin(async move {
            if !action.enabled() || !action.is_non_empty() {
                return Ok(None);
            }

            let project_path = PathBuf::from(message.str_field("projectPath").unwrap_or_default());
            let modified_files: HashSet<PathBuf> = message
                .get("paths")
                .and_then(Value::as_array)
                .map(|paths| {
                    paths
                        .iter()
                        .filter_map(Value::as_str)
                        .map(PathBuf::from)
                        .collect()
                })
                .unwrap_or_default();

            action.invoke(project_path, modified_files).await?;
            Ok(None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RpcError;
    use serde_json::json;
    use std::sync::Mutex;

    /// Action that records what it was invoked with.
    struct RecordingAction {
        enabled: bool,
        command: String,
        invocations: Mutex<Vec<(PathBuf, HashSet<PathBuf>)>>,
        fail_with: Option<String>,
    }

    impl RecordingAction {
        fn new(enabled: bool, command: &str) -> Self {
            Self {
                enabled,
                command: command.to_string(),
                invocations: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }
    }

    impl Action for RecordingAction {
        fn type_identifier(&self) -> &str {
            "RunCustomCommandAction"
        }

        fn load_memento(&mut self, memento: &Memento) {
            if let Some(enabled) = memento.get("enabled").and_then(Value::as_bool) {
                self.enabled = enabled;
            }
            if let Some(command) = memento.get("command").and_then(Value::as_str) {
                self.command = command.to_string();
            }
        }

        fn update_memento(&self, memento: &mut Memento) {
            memento.insert("action".to_string(), json!(self.type_identifier()));
            memento.insert("enabled".to_string(), json!(self.enabled));
            memento.insert("command".to_string(), json!(self.command));
        }

        fn enabled(&self) -> bool {
            self.enabled
        }

        fn is_non_empty(&self) -> bool {
            !self.command.is_empty()
        }

        fn invoke(
            &self,
            project_path: PathBuf,
            modified_files: HashSet<PathBuf>,
        ) -> BoxFuture<'static, Result<()>> {
            self.invocations
                .lock()
                .unwrap()
                .push((project_path, modified_files));
            let fail = self.fail_with.clone();
            Box::pin(async move {
                match fail {
                    Some(msg) => Err(RpcError::Script(msg)),
                    None => Ok(()),
                }
            })
        }
    }

    #[tokio::test]
    async fn test_handler_invokes_enabled_action() {
        let action = Arc::new(RecordingAction::new(true, "make build"));
        let handler = ActionHandler::new(action.clone());

        let msg = Message::from_value(json!({
            "api": "app.run-action",
            "projectPath": "/projects/site",
            "paths": ["index.html", "css/main.css"],
        }))
        .unwrap();

        let reply = handler.call(msg).await.unwrap();
        assert!(reply.is_none());

        let invocations = action.invocations.lock().unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].0, PathBuf::from("/projects/site"));
        assert!(invocations[0].1.contains(&PathBuf::from("index.html")));
        assert!(invocations[0].1.contains(&PathBuf::from("css/main.css")));
    }

    #[tokio::test]
    async fn test_handler_skips_disabled_action() {
        let action = Arc::new(RecordingAction::new(false, "make build"));
        let handler = ActionHandler::new(action.clone());

        handler
            .call(Message::for_api("app.run-action"))
            .await
            .unwrap();
        assert!(action.invocations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handler_skips_empty_action() {
        let action = Arc::new(RecordingAction::new(true, ""));
        let handler = ActionHandler::new(action.clone());

        handler
            .call(Message::for_api("app.run-action"))
            .await
            .unwrap();
        assert!(action.invocations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handler_propagates_invoke_failure() {
        let mut action = RecordingAction::new(true, "make build");
        action.fail_with = Some("script exited with status 1".to_string());
        let handler = ActionHandler::new(Arc::new(action));

        let result = handler.call(Message::for_api("app.run-action")).await;
        assert!(matches!(result, Err(RpcError::Script(_))));
    }

    #[test]
    fn test_memento_round_trip() {
        let mut memento = Memento::new();
        let action = RecordingAction::new(true, "make build");
        action.update_memento(&mut memento);

        let mut restored = RecordingAction::new(false, "");
        restored.load_memento(&memento);
        assert!(restored.enabled());
        assert!(restored.is_non_empty());
        assert_eq!(restored.command, "make build");
    }
}
