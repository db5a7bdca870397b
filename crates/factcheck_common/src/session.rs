//! Per-screen check state.
//!
//! A screen owns one [`CheckController`]. Its state is a [`CheckSession`]
//! value that is replaced on every transition. Only one request may be in
//! flight; each request carries a sequence number and a completion is applied
//! only if it belongs to the request currently in flight.

use crate::checker::{CheckOutcome, FactChecker};
use crate::error::CheckError;
use crate::interpret::CheckResult;
use crate::model::ModelId;
use crate::transport::ChatTransport;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What happens to a reply when the input was edited while it was in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleReplyPolicy {
    /// Show the reply regardless of later edits
    #[default]
    Apply,
    /// Drop the reply and return to idle
    DiscardIfEdited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckSession {
    Idle,
    InFlight { seq: u64, source_text: String },
    Completed { seq: u64, result: CheckResult },
    NotImplemented { seq: u64, message: String },
    Failed { seq: u64, message: String },
    /// Rejected before any request was issued
    Invalid { message: String },
}

impl CheckSession {
    /// Whether the trigger should be disabled
    pub fn is_loading(&self) -> bool {
        matches!(self, CheckSession::InFlight { .. })
    }

    pub fn result(&self) -> Option<&CheckResult> {
        match self {
            CheckSession::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Text currently shown in the result area
    pub fn output_text(&self) -> &str {
        match self {
            CheckSession::Completed { result, .. } => result.analysis(),
            CheckSession::NotImplemented { message, .. } => message.as_str(),
            _ => "",
        }
    }

    /// Inline message for the user (error or notice)
    pub fn message(&self) -> Option<&str> {
        match self {
            CheckSession::Completed { result, .. } => result.notice(),
            CheckSession::Failed { message, .. } | CheckSession::Invalid { message } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// Proof that a request was started; hand it back on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

pub struct CheckController {
    session: CheckSession,
    input: String,
    last_seq: u64,
    edited_in_flight: bool,
    stale_policy: StaleReplyPolicy,
}

impl CheckController {
    pub fn new(stale_policy: StaleReplyPolicy) -> Self {
        Self {
            session: CheckSession::Idle,
            input: String::new(),
            last_seq: 0,
            edited_in_flight: false,
            stale_policy,
        }
    }

    pub fn session(&self) -> &CheckSession {
        &self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        if self.session.is_loading() {
            self.edited_in_flight = true;
        }
    }

    /// Start a check of `source_text`.
    ///
    /// Fails without issuing a sequence number while a request is in flight
    /// or when the text is blank.
    pub fn begin(&mut self, source_text: &str) -> Result<Ticket, CheckError> {
        if self.session.is_loading() {
            return Err(CheckError::CheckInFlight);
        }
        if source_text.trim().is_empty() {
            self.session = CheckSession::Invalid {
                message: CheckError::EmptyInput.to_string(),
            };
            return Err(CheckError::EmptyInput);
        }
        self.last_seq += 1;
        self.edited_in_flight = false;
        self.session = CheckSession::InFlight {
            seq: self.last_seq,
            source_text: source_text.to_string(),
        };
        debug!("Check #{} started", self.last_seq);
        Ok(Ticket { seq: self.last_seq })
    }

    /// Resolve the request identified by `ticket`.
    ///
    /// Returns false when the completion was ignored: the ticket is not the
    /// one in flight, or the stale-reply policy dropped it.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<CheckOutcome, CheckError>) -> bool {
        match &self.session {
            CheckSession::InFlight { seq, .. } if *seq == ticket.seq => {}
            _ => {
                debug!("Ignoring completion of stale check #{}", ticket.seq);
                return false;
            }
        }

        if self.edited_in_flight && self.stale_policy == StaleReplyPolicy::DiscardIfEdited {
            info!("Input changed during check #{}, discarding reply", ticket.seq);
            self.session = CheckSession::Idle;
            self.edited_in_flight = false;
            return false;
        }

        let seq = ticket.seq;
        self.session = match outcome {
            Ok(CheckOutcome::Checked(result)) => CheckSession::Completed { seq, result },
            Ok(CheckOutcome::NotImplemented(message)) => {
                CheckSession::NotImplemented { seq, message }
            }
            Err(err @ CheckError::UnsupportedModel { .. }) => CheckSession::NotImplemented {
                seq,
                message: err.to_string(),
            },
            Err(CheckError::EmptyInput) => CheckSession::Invalid {
                message: CheckError::EmptyInput.to_string(),
            },
            Err(err) => CheckSession::Failed {
                seq,
                message: err.user_message(),
            },
        };
        self.edited_in_flight = false;
        true
    }

    /// Begin, send through `checker`, and complete
    pub async fn run<T: ChatTransport>(
        &mut self,
        checker: &FactChecker<T>,
        source_text: &str,
        model: Option<&ModelId>,
    ) -> &CheckSession {
        let ticket = match self.begin(source_text) {
            Ok(ticket) => ticket,
            Err(CheckError::EmptyInput) => {
                self.session = CheckSession::Invalid {
                    message: checker.profile().empty_input_message.to_string(),
                };
                return &self.session;
            }
            Err(_) => return &self.session,
        };
        let outcome = checker.check(source_text, model).await;
        self.complete(ticket, outcome);
        &self.session
    }
}

impl Default for CheckController {
    fn default() -> Self {
        Self::new(StaleReplyPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::interpret;

    #[test]
    fn test_begin_rejects_blank_without_sequence() {
        let mut controller = CheckController::default();
        assert!(matches!(controller.begin("   "), Err(CheckError::EmptyInput)));
        assert!(!controller.session().is_loading());
        let ticket = controller.begin("claim").unwrap();
        assert_eq!(ticket.seq(), 1);
    }

    #[test]
    fn test_message_for_fallback_result() {
        let mut controller = CheckController::default();
        let ticket = controller.begin("claim").unwrap();
        controller.complete(ticket, Ok(CheckOutcome::Checked(interpret("plain prose"))));
        assert_eq!(controller.session().output_text(), "plain prose");
        assert_eq!(
            controller.session().message(),
            Some(crate::interpret::FALLBACK_NOTICE)
        );
    }
}
