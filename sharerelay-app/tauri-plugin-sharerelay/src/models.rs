use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Intent action the host uses for "share with" requests.
pub const ACTION_SEND: &str = "android.intent.action.SEND";

/// The only MIME type the relay accepts.
pub const MIME_TEXT_PLAIN: &str = "text/plain";

/// A share event delivered by the host platform.
///
/// Mirrors the three fields of an Android `Intent` the relay cares about.
/// Desktop hosts build one from command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareIntent {
    pub action: String,
    pub mime_type: Option<String>,
    pub text: Option<String>,
}

impl ShareIntent {
    pub fn new(
        action: impl Into<String>,
        mime_type: Option<String>,
        text: Option<String>,
    ) -> Self {
        Self {
            action: action.into(),
            mime_type,
            text,
        }
    }

    /// A SEND intent carrying plain text.
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::new(
            ACTION_SEND,
            Some(MIME_TEXT_PLAIN.to_string()),
            Some(text.into()),
        )
    }

    pub fn is_send(&self) -> bool {
        self.action == ACTION_SEND || self.action == "SEND"
    }

    /// Whether the relay should handle this intent at all.
    pub fn is_plain_text_send(&self) -> bool {
        self.is_send() && self.mime_type.as_deref() == Some(MIME_TEXT_PLAIN)
    }
}

/// Answer of the Android `takeNewIntent` command.
///
/// `intent` is absent when nothing was delivered since the last resume.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewIntentResponse {
    #[serde(default)]
    pub intent: Option<ShareIntent>,
}

/// The single buffered shared-text value awaiting consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingShare {
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl PendingShare {
    pub fn new(text: String) -> Self {
        Self {
            text,
            received_at: Utc::now(),
        }
    }
}

/// Response from the getPendingShare command.
///
/// Reports the pending value without consuming it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingShareResponse {
    /// The shared text content, if any
    pub content: Option<String>,
    /// Whether there was pending content
    pub has_pending: bool,
    /// When the pending content arrived
    pub received_at: Option<DateTime<Utc>>,
}

impl From<Option<PendingShare>> for PendingShareResponse {
    fn from(pending: Option<PendingShare>) -> Self {
        match pending {
            Some(share) => Self {
                content: Some(share.text),
                has_pending: true,
                received_at: Some(share.received_at),
            },
            None => Self::default(),
        }
    }
}

/// Notification pushed from the relay to the webview over the bridge.
///
/// Serialized as `{"method": "sharedText", "arguments": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "method", content = "arguments")]
pub enum BridgeMessage {
    #[serde(rename = "sharedText")]
    SharedText(String),
}

/// Result of a method invoked by the webview on the bridge channel.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success { value: serde_json::Value },
    NotImplemented { method: String },
}

impl MethodResponse {
    pub fn success(value: impl Serialize) -> Self {
        Self::Success {
            value: serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        }
    }
}
