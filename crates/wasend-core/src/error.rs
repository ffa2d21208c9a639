use thiserror::Error;

#[derive(Debug, Error)]
pub enum WasendError {
    #[error("not initialized: run 'wasend init'")]
    NotInitialized,

    #[error("missing required field: {0}")]
    Validation(String),

    #[error("phone {0} already exists in the list")]
    Duplicate(String),

    #[error("contact limit reached: at most {0} contacts can be stored")]
    Capacity(usize),

    #[error("no contact with phone {0}")]
    NotFound(String),

    #[error("stored contacts are unreadable: {0}")]
    Parse(String),

    #[error("failed to persist contacts: {0}")]
    StorageWrite(String),

    #[error("message template is empty: write the message before sending")]
    EmptyTemplate,

    #[error("pending confirmation not found: {0}")]
    ConfirmationNotFound(String),

    #[error("unknown category '{0}': must be cartera, top, occasional, recover, or project")]
    InvalidCategory(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl WasendError {
    /// Corrupt storage and failed writes are reported but never abort the session.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, WasendError::Parse(_) | WasendError::StorageWrite(_))
    }
}

pub type Result<T> = std::result::Result<T, WasendError>;
