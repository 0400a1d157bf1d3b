//! Error handling and custom error types
//!
//! Provides unified error handling across the client using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error category for callers that branch on failure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Server,
    MalformedResponse,
    Config,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Server { .. } => ErrorKind::Server,
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Error::Config(_) | Error::EnvVar(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display_includes_status_and_body() {
        let err = Error::Server {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (500): internal error");
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_config_kinds() {
        assert_eq!(
            Error::Config("bad url".to_string()).kind(),
            ErrorKind::Config
        );
        assert_eq!(
            Error::MalformedResponse("eof".to_string()).kind(),
            ErrorKind::MalformedResponse
        );
    }
}
