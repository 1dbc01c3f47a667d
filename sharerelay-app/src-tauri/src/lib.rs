mod cli;
mod error;
mod storage;

use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_sharerelay::ShareRelayExt;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storage::{get_or_create_settings, settings_path, AppSettings};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sharerelay_app=debug,tauri_plugin_sharerelay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ShareRelay...");

    let builder = tauri::Builder::default();

    // A second launch forwards its arguments here instead of starting a new
    // process, which is the desktop counterpart of a re-delivered intent.
    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, argv, _cwd| {
        let accepted = app
            .try_state::<AppSettings>()
            .map_or(true, |settings| settings.accept_command_line_shares);
        if accepted {
            deliver_command_line_share(app, argv);
        }
    }));

    builder
        .plugin(tauri_plugin_sharerelay::init())
        .setup(|app| {
            let settings = initialize_app(app.handle());
            if settings.accept_command_line_shares {
                deliver_command_line_share(app.handle(), std::env::args_os());
            }
            app.manage(settings);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn initialize_app<R: Runtime>(app: &AppHandle<R>) -> AppSettings {
    let settings = load_settings(app);
    apply_settings(app, &settings);
    settings
}

/// Falls back to defaults when the data directory or settings file is unusable.
fn load_settings<R: Runtime>(app: &AppHandle<R>) -> AppSettings {
    match settings_path(app).and_then(|path| get_or_create_settings(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

fn apply_settings<R: Runtime>(app: &AppHandle<R>, settings: &AppSettings) {
    if let Some(policy) = settings.delivery_override() {
        info!("Share delivery policy from settings: {:?}", policy);
        app.share_relay().set_delivery_policy(policy);
    }
}

fn deliver_command_line_share<R, I, T>(app: &AppHandle<R>, args: I)
where
    R: Runtime,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString>,
{
    if let Some(intent) = cli::share_intent_from_args(args) {
        info!("Delivering share intent from command line");
        app.share_relay().on_share_received(intent);
    }
}
