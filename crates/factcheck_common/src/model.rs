//! Model selector entries.
//!
//! Only the Sonar family has a backing implementation. Every other entry is a
//! placeholder that resolves to the "not yet implemented" message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model family behind a selector entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Sonar,
    Gemini,
    ChatGpt,
    Claude,
    Unknown,
}

/// A model identifier as chosen in the selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

/// Selector entries in display order: (id, label)
pub const SELECTOR: &[(&str, &str)] = &[
    ("sonar-pro", "Sonar Pro (Recommended)"),
    ("sonar-free", "Sonar Free"),
    ("gemini", "Gemini"),
    ("chatgpt", "ChatGPT"),
    ("claude", "Claude"),
];

pub const DEFAULT_MODEL: &str = "sonar-pro";

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn family(&self) -> ModelFamily {
        let id = self.0.as_str();
        if id.starts_with("sonar") {
            ModelFamily::Sonar
        } else if id == "gemini" {
            ModelFamily::Gemini
        } else if id == "chatgpt" {
            ModelFamily::ChatGpt
        } else if id == "claude" {
            ModelFamily::Claude
        } else {
            ModelFamily::Unknown
        }
    }

    /// Whether requests for this model can actually be sent
    pub fn is_supported(&self) -> bool {
        self.family() == ModelFamily::Sonar
    }

    /// Selector label, if this id is one of the selector entries
    pub fn label(&self) -> Option<&'static str> {
        SELECTOR
            .iter()
            .find(|(id, _)| *id == self.0)
            .map(|(_, label)| *label)
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self(DEFAULT_MODEL.to_string())
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// All selector entries as model ids
pub fn selector_models() -> Vec<ModelId> {
    SELECTOR.iter().map(|(id, _)| ModelId::new(*id)).collect()
}
