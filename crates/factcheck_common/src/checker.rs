//! The fact checker: one component for every check screen.
//!
//! A screen profile decides the prompt and which model is used; the rest of
//! the flow (validate, build, send, interpret) is shared.

use crate::config::{ApiToken, FactCheckConfig};
use crate::error::CheckError;
use crate::interpret::{CheckResult, Interpreter};
use crate::model::ModelId;
use crate::prompt::ScreenProfile;
use crate::request::{self, RequestSpec};
use crate::transport::ChatTransport;
use tracing::{info, warn};

/// What a finished check produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The endpoint replied; structured or fallback result
    Checked(CheckResult),
    /// The selected model has no backing implementation. No call was made.
    NotImplemented(String),
}

pub struct FactChecker<T> {
    transport: T,
    profile: ScreenProfile,
    endpoint: String,
    token: ApiToken,
    interpreter: Interpreter,
}

impl<T: ChatTransport> FactChecker<T> {
    pub fn new(
        transport: T,
        profile: ScreenProfile,
        config: &FactCheckConfig,
        token: ApiToken,
    ) -> Self {
        Self {
            transport,
            profile,
            endpoint: config.endpoint.clone(),
            token,
            interpreter: Interpreter::new(config.score_policy, config.extraction),
        }
    }

    pub fn profile(&self) -> &ScreenProfile {
        &self.profile
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request this checker would send, without sending it
    pub fn prepare(&self, text: &str, model: Option<&ModelId>) -> Result<RequestSpec, CheckError> {
        let model = self.profile.resolve_model(model);
        request::build(text, &model, self.profile.prompt, &self.endpoint, &self.token)
    }

    /// Run one check end to end
    pub async fn check(
        &self,
        text: &str,
        model: Option<&ModelId>,
    ) -> Result<CheckOutcome, CheckError> {
        let spec = match self.prepare(text, model) {
            Ok(spec) => spec,
            Err(err @ CheckError::UnsupportedModel { .. }) => {
                info!("{}", err);
                return Ok(CheckOutcome::NotImplemented(err.to_string()));
            }
            Err(err) => return Err(err),
        };

        info!(
            screen = self.profile.name,
            model = %spec.body.model,
            chars = spec.source_text().chars().count(),
            "Sending fact-check request"
        );

        let raw = self.transport.complete(&spec).await.map_err(|e| {
            warn!("Fact-check request failed: {}", e);
            CheckError::Transport(e)
        })?;

        Ok(CheckOutcome::Checked(self.interpreter.interpret(&raw)))
    }
}
