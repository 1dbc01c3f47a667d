use serde::{Serialize, Serializer};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The webview addressed a channel this relay does not own.
    #[error("Unknown bridge channel: {0}")]
    UnknownChannel(String),

    /// Reading the launch intent through JNI failed.
    #[error("Failed to read share intent: {0}")]
    Jni(String),

    /// The Kotlin side of the plugin failed to answer.
    #[cfg(target_os = "android")]
    #[error("Plugin invoke error: {0}")]
    PluginInvoke(String),

    #[error(transparent)]
    Tauri(#[from] tauri::Error),
}

#[cfg(target_os = "android")]
impl From<tauri::plugin::mobile::PluginInvokeError> for Error {
    fn from(err: tauri::plugin::mobile::PluginInvokeError) -> Self {
        Error::PluginInvoke(err.to_string())
    }
}

#[cfg(target_os = "android")]
impl From<jni::errors::Error> for Error {
    fn from(err: jni::errors::Error) -> Self {
        Error::Jni(err.to_string())
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_as_message() {
        let err = Error::UnknownChannel("com.other.app/share".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Unknown bridge channel: com.other.app/share\"");
    }
}
