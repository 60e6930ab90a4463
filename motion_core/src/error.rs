use motion_traits::ScoreCategory;
use thiserror::Error;

/// Failure of a single evaluation. Every variant carries enough text to be
/// shown to the caller as-is.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("unknown motion '{0}'")]
    UnknownMotion(String),
    #[error("motion '{motion}' has no {category} recordings")]
    InsufficientBaseline {
        motion: String,
        category: ScoreCategory,
    },
    #[error("schema error: {0}")]
    Schema(String),
    #[error("alignment error: {0}")]
    Alignment(String),
    #[error("numeric error: {0}")]
    Numeric(String),
    #[error("baseline store error: {0}")]
    Store(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of `EvalError` for callers that map failures to
/// response categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownMotion,
    InsufficientBaseline,
    Schema,
    Alignment,
    Numeric,
    Store,
    Config,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::UnknownMotion => "UnknownMotion",
            ErrorKind::InsufficientBaseline => "InsufficientBaseline",
            ErrorKind::Schema => "Schema",
            ErrorKind::Alignment => "Alignment",
            ErrorKind::Numeric => "Numeric",
            ErrorKind::Store => "Store",
            ErrorKind::Config => "Config",
        }
    }

    /// True when the caller's input is at fault (bad request); false for
    /// administrative or infrastructure problems (server error).
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            ErrorKind::UnknownMotion | ErrorKind::Schema | ErrorKind::Alignment | ErrorKind::Numeric
        )
    }
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnknownMotion(_) => ErrorKind::UnknownMotion,
            EvalError::InsufficientBaseline { .. } => ErrorKind::InsufficientBaseline,
            EvalError::Schema(_) => ErrorKind::Schema,
            EvalError::Alignment(_) => ErrorKind::Alignment,
            EvalError::Numeric(_) => ErrorKind::Numeric,
            EvalError::Store(_) => ErrorKind::Store,
            EvalError::Config(_) => ErrorKind::Config,
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing baseline store")]
    MissingStore,
    #[error("missing channel configuration")]
    MissingChannels,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
