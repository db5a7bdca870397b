//! Request builder for the chat-completion endpoint.
//!
//! Pure construction: nothing here performs I/O.

use crate::config::ApiToken;
use crate::error::CheckError;
use crate::model::ModelId;
use crate::prompt::PromptVariant;
use serde::{Deserialize, Serialize};

/// A single role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// The text and model of one user-initiated check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub source_text: String,
    pub model: ModelId,
    pub prompt: PromptVariant,
}

/// Everything a transport needs to send one check
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub endpoint: String,
    pub token: ApiToken,
    pub body: ChatRequest,
}

impl RequestSpec {
    /// Header pairs in send order. The authorization value contains the token.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            ("Authorization", format!("Bearer {}", self.token.expose())),
        ]
    }

    /// The user text exactly as it will be sent
    pub fn source_text(&self) -> &str {
        self.body
            .messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

impl CheckRequest {
    /// Validate input and model. Empty input is reported before the model.
    pub fn new(
        source_text: &str,
        model: ModelId,
        prompt: PromptVariant,
    ) -> Result<Self, CheckError> {
        if source_text.trim().is_empty() {
            return Err(CheckError::EmptyInput);
        }
        if !model.is_supported() {
            return Err(CheckError::UnsupportedModel {
                model: model.to_string(),
            });
        }
        Ok(Self {
            source_text: source_text.to_string(),
            model,
            prompt,
        })
    }

    pub fn into_spec(self, endpoint: &str, token: &ApiToken) -> RequestSpec {
        RequestSpec {
            endpoint: endpoint.to_string(),
            token: token.clone(),
            body: ChatRequest {
                model: self.model.to_string(),
                messages: vec![
                    ChatMessage::system(self.prompt.system_prompt()),
                    ChatMessage::user(self.source_text),
                ],
            },
        }
    }
}

/// Build the outbound request for `source_text` sent to `model`.
///
/// The user text is carried verbatim, untrimmed.
pub fn build(
    source_text: &str,
    model: &ModelId,
    prompt: PromptVariant,
    endpoint: &str,
    token: &ApiToken,
) -> Result<RequestSpec, CheckError> {
    CheckRequest::new(source_text, model.clone(), prompt).map(|req| req.into_spec(endpoint, token))
}
