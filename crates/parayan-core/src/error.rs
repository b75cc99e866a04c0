use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParayanError {
    #[error("not initialized: run 'parayan init'")]
    NotInitialized,

    #[error("invalid name: must not be empty")]
    InvalidName,

    #[error("invalid chapter {chapter}: must be between 1 and {max}")]
    InvalidChapter { chapter: u32, max: u32 },

    #[error("limit reached: max {capacity} members allowed per group")]
    CapacityExceeded { capacity: usize },

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("cannot delete the last remaining group")]
    LastGroupDeletion,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("roster is empty: add members first")]
    EmptyRoster,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ParayanError>;
