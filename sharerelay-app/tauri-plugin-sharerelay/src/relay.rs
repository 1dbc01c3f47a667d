use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::bridge::{BridgeSink, METHOD_GET_SHARED_TEXT};
use crate::config::DeliveryPolicy;
use crate::models::{BridgeMessage, MethodResponse, PendingShare, PendingShareResponse, ShareIntent};

/// Buffers the latest shared text and hands it to the webview.
///
/// Holds at most one pending share (last write wins). The webview takes it
/// with `getSharedText`; if a bridge is attached the relay also pushes it as
/// a `sharedText` notification. Pushes run with the state unlocked, so a sink
/// may call back into the relay.
pub struct ShareRelay {
    channel: String,
    state: Mutex<RelayState>,
}

#[derive(Default)]
struct RelayState {
    pending: Option<PendingShare>,
    /// Bumped whenever a new share is stored.
    generation: u64,
    bridge: Option<Arc<dyn BridgeSink>>,
    policy: DeliveryPolicy,
}

/// A push captured under the lock and sent after it is released.
struct Delivery {
    bridge: Arc<dyn BridgeSink>,
    text: String,
    generation: u64,
}

impl RelayState {
    fn next_delivery(&self) -> Option<Delivery> {
        let share = self.pending.as_ref()?;
        let Some(bridge) = self.bridge.as_ref() else {
            debug!("share-relay: no bridge attached, push dropped");
            return None;
        };
        Some(Delivery {
            bridge: bridge.clone(),
            text: share.text.clone(),
            generation: self.generation,
        })
    }
}

impl ShareRelay {
    pub fn new(channel: impl Into<String>, policy: DeliveryPolicy) -> Self {
        Self {
            channel: channel.into(),
            state: Mutex::new(RelayState {
                policy,
                ..Default::default()
            }),
        }
    }

    /// Name of the bridge channel, `<identifier>/share` by default.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn delivery_policy(&self) -> DeliveryPolicy {
        self.lock().policy
    }

    pub fn set_delivery_policy(&self, policy: DeliveryPolicy) {
        self.lock().policy = policy;
    }

    pub fn is_bridge_attached(&self) -> bool {
        self.lock().bridge.is_some()
    }

    /// Handle a share event from the host platform.
    ///
    /// Anything other than a plain-text SEND is ignored. A plain-text SEND
    /// without a payload clears the pending share.
    pub fn on_share_received(&self, intent: ShareIntent) {
        if !intent.is_plain_text_send() {
            debug!(
                "share-relay: ignoring intent action={} type={:?}",
                intent.action, intent.mime_type
            );
            return;
        }

        let delivery = {
            let mut state = self.lock();
            match intent.text {
                Some(text) => {
                    info!("share-relay: received shared text ({} chars)", text.len());
                    if state.pending.is_some() {
                        debug!("share-relay: replacing unconsumed share");
                    }
                    state.pending = Some(PendingShare::new(text));
                    state.generation += 1;
                    state.next_delivery()
                }
                None => {
                    debug!("share-relay: plain-text share without payload, clearing");
                    state.pending = None;
                    None
                }
            }
        };
        self.deliver(delivery);
    }

    /// Register the webview's sink and flush any share that arrived earlier.
    ///
    /// Replaces a previously attached sink.
    pub fn attach_bridge<B>(&self, bridge: B)
    where
        B: BridgeSink + 'static,
    {
        let delivery = {
            let mut state = self.lock();
            if state.bridge.is_some() {
                debug!("share-relay: replacing attached bridge");
            }
            state.bridge = Some(Arc::new(bridge));
            info!("share-relay: bridge attached on {}", self.channel);
            state.next_delivery()
        };
        self.deliver(delivery);
    }

    /// Drop the attached sink. Returns whether one was attached.
    pub fn detach_bridge(&self) -> bool {
        let detached = self.lock().bridge.take().is_some();
        if detached {
            info!("share-relay: bridge detached from {}", self.channel);
        }
        detached
    }

    /// Take the pending share. Always leaves the relay empty.
    pub fn query_pending_share(&self) -> Option<String> {
        let taken = self.lock().pending.take().map(|share| share.text);
        debug!(
            "share-relay: webview requested shared text (pending: {})",
            taken.is_some()
        );
        taken
    }

    /// Report the pending share without consuming it.
    pub fn peek_pending_share(&self) -> PendingShareResponse {
        self.lock().pending.clone().into()
    }

    /// Drop the pending share. Returns whether there was one.
    pub fn clear_pending_share(&self) -> bool {
        self.lock().pending.take().is_some()
    }

    /// Answer a method call the webview made on the bridge channel.
    pub fn handle_method(&self, method: &str) -> MethodResponse {
        match method {
            METHOD_GET_SHARED_TEXT => MethodResponse::success(self.query_pending_share()),
            other => {
                debug!("share-relay: method not implemented: {}", other);
                MethodResponse::NotImplemented {
                    method: other.to_string(),
                }
            }
        }
    }

    fn deliver(&self, delivery: Option<Delivery>) {
        let Some(delivery) = delivery else {
            return;
        };

        match delivery.bridge.push(BridgeMessage::SharedText(delivery.text)) {
            Ok(()) => {
                debug!("share-relay: pushed shared text to webview");
                let mut state = self.lock();
                // A share that arrived during the push stays pending.
                if state.policy == DeliveryPolicy::ConsumeOnPush
                    && state.generation == delivery.generation
                {
                    state.pending = None;
                }
            }
            Err(e) => warn!("share-relay: push to webview failed: {}", e),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RelayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
