use std::fmt;

/// Errors surfaced by route handlers and the layers below them
/// (routing, validation, auth, DB, the chat-completion gateway).
#[derive(Debug)]
pub enum ServerError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    DbError(String),
    /// Gateway call failed (network, timeout, or non-2xx reply).
    Upstream(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound(msg) => write!(f, "{msg}"),
            ServerError::BadRequest(msg) => write!(f, "{msg}"),
            ServerError::Unauthorized(msg) => write!(f, "{msg}"),
            ServerError::Forbidden(msg) => write!(f, "{msg}"),
            ServerError::DbError(msg) => write!(f, "Database error: {msg}"),
            ServerError::Upstream(msg) => write!(f, "Upstream error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
