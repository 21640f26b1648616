use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Message is empty or whitespace-only")]
    EmptyMessage,

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Cannot delete the last remaining session: {session_id}")]
    LastSessionDelete { session_id: String },

    #[error("Session is awaiting a response: {session_id}")]
    ResponsePending { session_id: String },

    #[error("Unsupported export format: {0}")]
    UnknownExportFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound {
            session_id: session_id.into(),
        }
    }
}
