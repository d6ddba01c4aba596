//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::{App, ThemeMode};
use crate::core::transcript::Transcript;
use crate::remote::{RemoteError, Replier};

/// A replier that answers every exchange with the same fixed text.
pub struct StubReplier {
    pub reply: String,
}

impl StubReplier {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl Replier for StubReplier {
    fn name(&self) -> &str {
        "stub"
    }

    async fn reply(&self, _transcript: &Transcript, _model: &str) -> Result<String, RemoteError> {
        Ok(self.reply.clone())
    }
}

/// A replier that fails every exchange with the same API error.
pub struct FailingReplier {
    pub message: String,
}

impl FailingReplier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Replier for FailingReplier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn reply(&self, _transcript: &Transcript, _model: &str) -> Result<String, RemoteError> {
        Err(RemoteError::Api {
            status: 429,
            message: self.message.clone(),
        })
    }
}

/// Creates a test App with a StubReplier.
pub fn test_app() -> App {
    App::new(
        Arc::new(StubReplier::new("stub reply")),
        "test-model".to_string(),
        ThemeMode::Dark,
    )
}
