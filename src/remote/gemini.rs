//! Gemini client for the `generateContent` REST endpoint.
//!
//! This module uses Gemini API terminology:
//! - "contents" (array of turns, not "transcript")
//! - "parts" (each turn carries a list of text parts)
//! - roles: `user` and `model` (not "assistant")
//!
//! The call is a single JSON round trip (no streaming, no retries). The
//! credential travels in the `x-goog-api-key` header.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::transcript::{Author, Transcript};
use crate::remote::replier::{RemoteError, Replier};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// Gemini Wire Types
// ============================================================================

/// One text part of a content turn.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Part {
    text: String,
}

/// One turn in the `contents` array. Role is `user` or `model`.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

/// The request body for `models/{model}:generateContent`.
#[derive(Serialize, Debug)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

/// The response body. Only the candidate text is of interest here.
#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Converts the transcript into the Gemini `contents` array.
///
/// The endpoint is stateless, so the whole conversation is resent each
/// round trip; that is how the model sees prior turns. Assistant messages
/// map to the `model` role.
fn transcript_to_contents(transcript: &Transcript) -> Vec<Content> {
    transcript
        .iter()
        .map(|msg| Content {
            role: match msg.author {
                Author::User => "user".to_string(),
                Author::Assistant => "model".to_string(),
            },
            parts: vec![Part {
                text: msg.text.clone(),
            }],
        })
        .collect()
}

/// Extracts the reply text from a response, joining multi-part candidates.
fn extract_reply(response: GenerateResponse) -> Result<String, RemoteError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| RemoteError::Parse("response contained no candidates".to_string()))?;

    let content = candidate
        .content
        .ok_or_else(|| RemoteError::Parse("candidate contained no content".to_string()))?;

    if content.parts.is_empty() {
        return Err(RemoteError::Parse(
            "candidate content contained no parts".to_string(),
        ));
    }

    Ok(content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join(""))
}

// ============================================================================
// Replier Implementation
// ============================================================================

/// Gemini API client.
pub struct GeminiReplier {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiReplier {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key
    /// * `base_url` - Optional custom base URL (defaults to Google's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    async fn send_request(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<reqwest::Response, RemoteError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(RemoteError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Replier for GeminiReplier {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn reply(&self, transcript: &Transcript, model: &str) -> Result<String, RemoteError> {
        let request = GenerateRequest {
            contents: transcript_to_contents(transcript),
        };

        info!(
            "Gemini generateContent request: model={}, turns={}",
            model,
            request.contents.len()
        );

        let response = self.send_request(model, &request).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        let reply = extract_reply(body)?;
        debug!("Gemini reply: {} bytes", reply.len());
        Ok(reply)
    }
}
