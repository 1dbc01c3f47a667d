use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, RunEvent, Runtime,
};

pub use bridge::{BridgeSink, METHOD_GET_SHARED_TEXT};
pub use config::{default_channel_name, Config, DeliveryPolicy};
pub use models::*;
pub use relay::ShareRelay;

#[cfg(target_os = "android")]
mod android;

mod bridge;
mod commands;
mod config;
mod error;
mod models;
mod relay;

pub use error::{Error, Result};

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the share relay.
pub trait ShareRelayExt<R: Runtime> {
    fn share_relay(&self) -> &ShareRelay;
}

impl<R: Runtime, T: Manager<R>> crate::ShareRelayExt<R> for T {
    fn share_relay(&self) -> &ShareRelay {
        self.state::<ShareRelay>().inner()
    }
}

/// Initializes the share relay plugin.
///
/// - Buffers the latest plain-text share delivered by the host
/// - Pushes it to the webview once the webview attaches to the bridge
/// - Answers `getSharedText` on the `<identifier>/share` channel
///
/// On Android the launch intent is read at setup; intents delivered to the
/// running activity are taken from the Kotlin plugin on every resume. Other
/// hosts feed intents through [`ShareRelay::on_share_received`].
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<Config>> {
    Builder::<R, Option<Config>>::new("sharerelay")
        .invoke_handler(tauri::generate_handler![
            commands::attach_bridge,
            commands::detach_bridge,
            commands::invoke_method,
            commands::get_shared_text,
            commands::get_pending_share,
            commands::clear_pending_share,
        ])
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            let channel = config.channel_name(&app.config().identifier);
            log::info!("share-relay: serving channel {}", channel);

            let relay = ShareRelay::new(channel, config.delivery());
            #[cfg(target_os = "android")]
            {
                app.manage(android::init(&api)?);
                android::deliver_launch_intent(&relay);
            }
            app.manage(relay);
            Ok(())
        })
        .on_event(|_app, event| {
            if let RunEvent::Resumed = event {
                log::debug!("share-relay: app resumed");
                // The native call blocks until the Kotlin side answers, so keep
                // it off the main thread.
                #[cfg(target_os = "android")]
                {
                    let app = _app.clone();
                    tauri::async_runtime::spawn(async move {
                        android::deliver_new_intent(&app);
                    });
                }
            }
        })
        .build()
}
