//! Transport to the chat-completion endpoint.
//!
//! Provides the HTTP implementation and a scripted fake for tests.

use crate::error::TransportError;
use crate::request::{ChatRequest, RequestSpec};
use serde::Deserialize;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Sends one request and yields the reply text
pub trait ChatTransport: Send + Sync {
    fn complete(
        &self,
        spec: &RequestSpec,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Longest error body kept in a `TransportError::Status`
const MAX_ERROR_BODY: usize = 200;

/// Real transport using `reqwest`
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_secs: Option<u64>,
}

impl HttpTransport {
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    async fn send(&self, spec: &RequestSpec) -> Result<String, TransportError> {
        let body = serde_json::to_vec(&spec.body)
            .map_err(|e| TransportError::Request(format!("Failed to encode body: {}", e)))?;

        let mut request = self.client.post(&spec.endpoint).body(body);
        for (name, value) in spec.headers() {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout_secs.unwrap_or_default())
            } else {
                TransportError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("").to_string()
            } else {
                text.chars().take(MAX_ERROR_BODY).collect()
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Envelope(format!("Failed to parse response: {}", e)))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TransportError::Envelope("no choices in response".to_string()))?;

        debug!("Received {} chars from {}", content.len(), spec.endpoint);
        Ok(content)
    }
}

impl ChatTransport for HttpTransport {
    fn complete(
        &self,
        spec: &RequestSpec,
    ) -> impl Future<Output = Result<String, TransportError>> + Send {
        self.send(spec)
    }
}

/// Fake transport for testing
pub struct FakeTransport {
    replies: Mutex<Vec<Result<String, TransportError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeTransport {
    /// Create a fake with scripted replies, consumed in order; the last one repeats
    pub fn new(replies: Vec<Result<String, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn failing(error: TransportError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Number of requests that reached the transport
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Bodies of all requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn next_reply(&self, spec: &RequestSpec) -> Result<String, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(spec.body.clone());
        }
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| TransportError::Request("fake transport poisoned".to_string()))?;
        match replies.len() {
            0 => Err(TransportError::Envelope("no scripted reply".to_string())),
            1 => replies[0].clone(),
            _ => replies.remove(0),
        }
    }
}

impl ChatTransport for FakeTransport {
    fn complete(
        &self,
        spec: &RequestSpec,
    ) -> impl Future<Output = Result<String, TransportError>> + Send {
        std::future::ready(self.next_reply(spec))
    }
}
