//! Error types for calls against the video resource.

use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// The server reported no video with this identifier (404).
    NotFound(String),
    /// Any other non-success status, with the server's error message.
    Status { status: u16, message: String },
    /// Connection failure, timeout, or an unusable base URL.
    Transport(reqwest::Error),
    /// A success response whose body did not decode.
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NotFound(message) => write!(f, "not found: {}", message),
            ClientError::Status { status, message } => {
                write!(f, "server returned {}: {}", status, message)
            }
            ClientError::Transport(e) if e.is_timeout() => write!(f, "request timed out"),
            ClientError::Transport(e) => write!(f, "request failed: {}", e),
            ClientError::Decode(msg) => write!(f, "could not decode response: {}", msg),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }
}
