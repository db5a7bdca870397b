//! Error types for fact checking.

use thiserror::Error;

/// Errors surfaced to the caller of a check.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Please enter or select text to fact-check.")]
    EmptyInput,

    #[error("The {model} model is not yet implemented.")]
    UnsupportedModel { model: String },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("A fact-check is already in progress")]
    CheckInFlight,
}

impl CheckError {
    /// Message shown to the user in place of a result.
    ///
    /// Transport detail stays in the logs; the user gets the generic line.
    pub fn user_message(&self) -> String {
        match self {
            CheckError::Transport(_) => {
                "Sorry, an error occurred while trying to fact-check.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Network or HTTP-level failures talking to the chat-completion endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response envelope: {0}")]
    Envelope(String),
}

/// Configuration problems detected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API token not set (export {var})")]
    MissingToken { var: String },

    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Why a reply could not be read as a structured result.
///
/// Never returned to callers: the interpreter turns it into the raw-text
/// fallback and keeps it on the result for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReply {
    #[error("No JSON object found in reply")]
    NoJsonObject,

    #[error("Candidate span is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON object lacks a numeric score and a string analysis")]
    InvalidStructure,

    #[error("Score {0} is outside 0-100")]
    ScoreOutOfRange(i64),
}
