//! Webview side of the share bridge.
//!
//! The webview pulls with named method calls and receives pushes through
//! whatever sink it handed over when it attached.

use tauri::ipc::Channel;

use crate::models::BridgeMessage;
use crate::Result;

/// Method the webview calls to take the pending share.
pub const METHOD_GET_SHARED_TEXT: &str = "getSharedText";

/// Receives notifications pushed from the relay to the webview.
///
/// Pushes are fire-and-forget: the relay logs a failure and moves on.
pub trait BridgeSink: Send + Sync {
    fn push(&self, message: BridgeMessage) -> Result<()>;
}

impl BridgeSink for Channel<BridgeMessage> {
    fn push(&self, message: BridgeMessage) -> Result<()> {
        self.send(message).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tauri::ipc::InvokeResponseBody;

    use super::*;

    #[test]
    fn test_channel_sink_delivers_json() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink_received = received.clone();
        let channel: Channel<BridgeMessage> = Channel::new(move |body| {
            if let InvokeResponseBody::Json(json) = body {
                sink_received.lock().unwrap().push(json);
            }
            Ok(())
        });

        channel
            .push(BridgeMessage::SharedText("from the host".into()))
            .unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&received[0]).unwrap();
        assert_eq!(value["method"], "sharedText");
        assert_eq!(value["arguments"], "from the host");
    }
}
