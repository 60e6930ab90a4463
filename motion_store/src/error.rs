use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt store: {0}")]
    Corrupt(String),
    #[error("unknown motion '{0}'")]
    UnknownMotion(String),
    #[error("motion '{0}' already exists")]
    DuplicateMotion(String),
    #[error("recording has no frames")]
    EmptyRecording,
    #[error("non-finite reading: {0}")]
    NonFinite(String),
    #[error("invalid motion name: {0}")]
    InvalidName(String),
    #[error("store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
