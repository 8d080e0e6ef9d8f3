use lushi_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("window error: {0}")]
    Window(String),
    #[error("snapshot error: {0}")]
    Snapshot(String),
    #[error("restart error: {0}")]
    Restart(String),
    #[error("logic error: {0}")]
    Logic(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}

impl From<CoreError> for AutoplayError {
    fn from(value: CoreError) -> Self {
        Self::Logic(value.to_string())
    }
}
