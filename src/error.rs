use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid input record for {technology}: {reason}")]
    InvalidRecord { technology: String, reason: String },

    #[error("no snapshot files found under {0}")]
    NoSnapshots(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrendError {
    pub fn invalid_record(technology: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            technology: technology.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendError>;
