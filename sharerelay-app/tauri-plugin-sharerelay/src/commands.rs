use tauri::{command, ipc::Channel, AppHandle, Runtime};

use crate::models::*;
use crate::relay::ShareRelay;
use crate::{Error, Result, ShareRelayExt};

fn ensure_channel<'a>(relay: &'a ShareRelay, channel: &str) -> Result<&'a ShareRelay> {
    if relay.channel() == channel {
        Ok(relay)
    } else {
        Err(Error::UnknownChannel(channel.to_string()))
    }
}

/// Attach the webview's notification channel to the relay.
///
/// The frontend calls this once its `sharedText` handler is installed. Any
/// share that arrived before that is pushed right away.
#[command]
pub(crate) async fn attach_bridge<R: Runtime>(
    app: AppHandle<R>,
    channel: String,
    on_message: Channel<BridgeMessage>,
) -> Result<()> {
    ensure_channel(app.share_relay(), &channel)?.attach_bridge(on_message);
    Ok(())
}

/// Detach the notification channel, e.g. before the page unloads.
#[command]
pub(crate) async fn detach_bridge<R: Runtime>(app: AppHandle<R>) -> Result<bool> {
    Ok(app.share_relay().detach_bridge())
}

/// Invoke a named method on the bridge channel.
///
/// Unknown methods answer `notImplemented` instead of failing.
#[command]
pub(crate) async fn invoke_method<R: Runtime>(
    app: AppHandle<R>,
    channel: String,
    method: String,
) -> Result<MethodResponse> {
    Ok(ensure_channel(app.share_relay(), &channel)?.handle_method(&method))
}

/// Take the pending shared text, leaving the relay empty.
#[command]
pub(crate) async fn get_shared_text<R: Runtime>(app: AppHandle<R>) -> Result<Option<String>> {
    Ok(app.share_relay().query_pending_share())
}

/// Check if there's pending shared content without consuming it.
#[command]
pub(crate) async fn get_pending_share<R: Runtime>(
    app: AppHandle<R>,
) -> Result<PendingShareResponse> {
    Ok(app.share_relay().peek_pending_share())
}

/// Clear the pending shared content without processing it.
/// Useful for cancellation flows.
#[command]
pub(crate) async fn clear_pending_share<R: Runtime>(app: AppHandle<R>) -> Result<bool> {
    Ok(app.share_relay().clear_pending_share())
}
