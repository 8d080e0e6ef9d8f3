use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("logic error: {0}")]
    Logic(String),
    #[error("config error: {0}")]
    Config(String),
}
