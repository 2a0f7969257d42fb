//! Error types for notekeep.

use thiserror::Error;

/// Result type alias using notekeep's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for note store operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Blank or otherwise invalid input, rejected before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session, or the session expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Login rejected by the server
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Note id unknown to the server (or not owned by the session)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Username already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// HTTP/network request failed before a response arrived
    #[error("Request error: {0}")]
    Request(String),

    /// Server answered with an unexpected status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the catch-all transport / unexpected-response family.
    pub fn is_network_or_server(&self) -> bool {
        matches!(
            self,
            Error::Request(_) | Error::Server { .. } | Error::Serialization(_)
        )
    }

    /// True when the caller should send the user back to the login surface.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization(e.to_string())
        } else {
            Error::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "Validation error: title is required");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("session expired".to_string());
        assert_eq!(err.to_string(), "Unauthorized: session expired");
    }

    #[test]
    fn test_error_display_invalid_credentials() {
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_error_display_server() {
        let err = Error::Server {
            status: 500,
            message: "A database error occurred".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server error (500): A database error occurred"
        );
    }

    #[test]
    fn test_error_display_conflict() {
        let err = Error::Conflict("Username already exists".to_string());
        assert_eq!(err.to_string(), "Conflict: Username already exists");
    }

    #[test]
    fn test_network_or_server_family() {
        assert!(Error::Request("refused".into()).is_network_or_server());
        assert!(Error::Serialization("bad".into()).is_network_or_server());
        assert!(Error::Server {
            status: 502,
            message: String::new()
        }
        .is_network_or_server());

        assert!(!Error::NotFound("1".into()).is_network_or_server());
        assert!(!Error::InvalidCredentials.is_network_or_server());
        assert!(!Error::Validation("x".into()).is_network_or_server());
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(Error::Unauthorized("no session".into()).is_unauthorized());
        assert!(!Error::InvalidCredentials.is_unauthorized());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
