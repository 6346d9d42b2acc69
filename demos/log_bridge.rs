//! Minimal composition root: build a router at startup, share it, dispatch a
//! few decoded messages.
//!
//! Run with: `cargo run --example log_bridge`

use std::sync::Arc;

use serde_json::json;

use nodeapp_rpc::kernel::KernelLog;
use nodeapp_rpc::{Message, Router, RpcError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Built once, immutable afterwards; shared freely across tasks.
    let router = Arc::new(
        Router::builder()
            .route("kernel.log", KernelLog::new())
            .route_fn("kernel.on-port-occupied-error", |msg: Message| async move {
                let port = msg.get("port").and_then(|v| v.as_u64()).unwrap_or(0);
                tracing::error!(port, "livereload port is already in use");
                Ok(None)
            })
            .build()?,
    );

    let requests = [
        json!({"api": "kernel.log", "text": "server started", "level": "info"}),
        json!({"api": "kernel.on-port-occupied-error", "port": 35729}),
        json!({"api": "kernel.not-a-thing"}),
    ];

    for request in requests {
        let msg = Message::from_value(request)?;
        match router.dispatch(msg).await {
            Ok(Some(reply)) => tracing::info!(?reply, "reply"),
            Ok(None) => {}
            Err(RpcError::UnknownApi(name)) => {
                tracing::warn!(api = %name, "dropping message for unknown api");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
