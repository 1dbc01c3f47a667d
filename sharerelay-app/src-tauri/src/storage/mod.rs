mod config;

pub use config::{get_or_create_settings, settings_path, AppSettings};
