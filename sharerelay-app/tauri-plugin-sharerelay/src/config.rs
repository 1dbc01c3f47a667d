use serde::Deserialize;

/// Suffix appended to the bundle identifier to name the bridge channel.
pub const CHANNEL_SUFFIX: &str = "/share";

/// Plugin configuration read from `plugins.sharerelay` in `tauri.conf.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Overrides the default `<identifier>/share` channel name.
    #[serde(default)]
    pub channel: Option<String>,
    /// Clear the pending share once a push reached the webview.
    #[serde(default)]
    pub consume_on_push: bool,
}

impl Config {
    pub fn channel_name(&self, identifier: &str) -> String {
        self.channel
            .clone()
            .unwrap_or_else(|| default_channel_name(identifier))
    }

    pub fn delivery(&self) -> DeliveryPolicy {
        if self.consume_on_push {
            DeliveryPolicy::ConsumeOnPush
        } else {
            DeliveryPolicy::QueryOnly
        }
    }
}

pub fn default_channel_name(identifier: &str) -> String {
    format!("{}{}", identifier, CHANNEL_SUFFIX)
}

/// Which paths clear the pending share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Only `getSharedText` clears; pushes leave the value queryable.
    #[default]
    QueryOnly,
    /// A push the bridge accepted also clears the value.
    ConsumeOnPush,
}
