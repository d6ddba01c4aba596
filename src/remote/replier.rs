use std::fmt;

use async_trait::async_trait;

use crate::core::transcript::Transcript;

/// Errors that can occur while obtaining a reply from the remote service.
#[derive(Debug)]
pub enum RemoteError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API returned an error response.
    Api { status: u16, message: String },
    /// The API responded but the body could not be interpreted.
    Parse(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Network(msg) => write!(f, "network error: {msg}"),
            RemoteError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RemoteError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// The remote seam: one operation, "send the conversation so far, receive
/// the next assistant reply". Implementations hold whatever client state
/// and credentials the service needs.
#[async_trait]
pub trait Replier: Send + Sync {
    /// Returns the name of the backing service.
    fn name(&self) -> &str;

    /// Produce the assistant's reply to the latest user message, given the
    /// full transcript so far. One call, one complete reply; no retries.
    async fn reply(&self, transcript: &Transcript, model: &str) -> Result<String, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_embeds_detail() {
        let err = RemoteError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("quota exceeded"));

        assert_eq!(
            RemoteError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            RemoteError::Parse("missing candidates".into()).to_string(),
            "parse error: missing candidates"
        );
    }
}
