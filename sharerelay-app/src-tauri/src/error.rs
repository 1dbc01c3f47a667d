use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareRelayAppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Share relay error: {0}")]
    Relay(#[from] tauri_plugin_sharerelay::Error),
}

impl serde::Serialize for ShareRelayAppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShareRelayAppError>;
