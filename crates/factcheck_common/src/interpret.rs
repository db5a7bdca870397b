//! Response interpreter.
//!
//! Turns the free-text content of a model reply into a [`CheckResult`].
//! Replies are not guaranteed to contain only JSON: they may be wrapped in
//! prose or code fences, so a JSON object is located inside the text first.
//! When no object of the expected shape can be isolated the whole reply
//! becomes the analysis and no score is reported.
//!
//! Greedy extraction (first `{` to last `}`) is fooled by several JSON-like
//! fragments in one reply. That is a known limitation; `Balanced` extraction
//! is available as an opt-in.

use crate::error::MalformedReply;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Informational notice shown alongside a fallback result
pub const FALLBACK_NOTICE: &str = "Couldn't determine a truth score. Displaying raw analysis.";

pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 100;

/// What to do with a score outside 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScorePolicy {
    /// Clamp into 0-100
    #[default]
    Clamp,
    /// Keep whatever the model returned
    PassThrough,
    /// Treat the reply as malformed and fall back to raw text
    Reject,
}

/// How the candidate JSON object is located in the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMode {
    /// First `{` through last `}`
    #[default]
    Greedy,
    /// Each balanced top-level object in order; first valid one wins
    Balanced,
}

/// Structured outcome of one check.
///
/// Either a score with the model's analysis, or no score with the full raw
/// reply as analysis. The constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    score: Option<i64>,
    analysis: String,
    used_fallback: bool,
    #[serde(skip)]
    fallback_reason: Option<MalformedReply>,
}

impl CheckResult {
    fn structured(score: i64, analysis: String) -> Self {
        Self {
            score: Some(score),
            analysis,
            used_fallback: false,
            fallback_reason: None,
        }
    }

    fn fallback(raw_reply: &str, reason: MalformedReply) -> Self {
        Self {
            score: None,
            analysis: raw_reply.to_string(),
            used_fallback: true,
            fallback_reason: Some(reason),
        }
    }

    pub fn score(&self) -> Option<i64> {
        self.score
    }

    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Why structured parsing failed, for diagnostics
    pub fn fallback_reason(&self) -> Option<&MalformedReply> {
        self.fallback_reason.as_ref()
    }

    /// Non-blocking notice for the user, present only on fallback
    pub fn notice(&self) -> Option<&'static str> {
        self.used_fallback.then_some(FALLBACK_NOTICE)
    }
}

/// Reply interpreter with its policies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interpreter {
    pub score_policy: ScorePolicy,
    pub extraction: ExtractionMode,
}

impl Interpreter {
    pub fn new(score_policy: ScorePolicy, extraction: ExtractionMode) -> Self {
        Self {
            score_policy,
            extraction,
        }
    }

    pub fn interpret(&self, raw_reply: &str) -> CheckResult {
        let parsed = match self.extraction {
            ExtractionMode::Greedy => match greedy_span(raw_reply) {
                Some(span) => parse_candidate(span, self.score_policy),
                None => Err(MalformedReply::NoJsonObject),
            },
            ExtractionMode::Balanced => self.first_valid_balanced(raw_reply),
        };

        match parsed {
            Ok((score, analysis)) => CheckResult::structured(score, analysis),
            Err(reason) => {
                debug!("Reply fell back to raw text: {}", reason);
                CheckResult::fallback(raw_reply, reason)
            }
        }
    }

    fn first_valid_balanced(&self, raw_reply: &str) -> Result<(i64, String), MalformedReply> {
        let mut first_error = None;
        for span in balanced_spans(raw_reply) {
            match parse_candidate(span, self.score_policy) {
                Ok(found) => return Ok(found),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or(MalformedReply::NoJsonObject))
    }
}

/// Interpret a reply with default policies (greedy extraction, clamped score)
pub fn interpret(raw_reply: &str) -> CheckResult {
    Interpreter::default().interpret(raw_reply)
}

/// Substring from the first `{` to the last `}`, if the latter follows the former
pub fn greedy_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Balanced top-level `{...}` spans in order of appearance.
///
/// Braces inside JSON string literals are ignored once an object is open.
pub fn balanced_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in text.bytes().enumerate() {
        if depth > 0 && in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' if depth > 0 => in_string = true,
            b'{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    spans
}

fn parse_candidate(span: &str, policy: ScorePolicy) -> Result<(i64, String), MalformedReply> {
    let value: Value =
        serde_json::from_str(span).map_err(|e| MalformedReply::InvalidJson(e.to_string()))?;

    let score = value
        .get("score")
        .and_then(numeric_score)
        .ok_or(MalformedReply::InvalidStructure)?;
    let analysis = value
        .get("analysis")
        .and_then(Value::as_str)
        .ok_or(MalformedReply::InvalidStructure)?;

    let score = apply_policy(score, policy)?;
    Ok((score, analysis.to_string()))
}

/// Any JSON number; fractional values are rounded
fn numeric_score(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if value.as_u64().is_some() {
        return Some(i64::MAX);
    }
    value.as_f64().map(|f| f.round() as i64)
}

fn apply_policy(score: i64, policy: ScorePolicy) -> Result<i64, MalformedReply> {
    match policy {
        ScorePolicy::Clamp => Ok(score.clamp(SCORE_MIN, SCORE_MAX)),
        ScorePolicy::PassThrough => Ok(score),
        ScorePolicy::Reject if (SCORE_MIN..=SCORE_MAX).contains(&score) => Ok(score),
        ScorePolicy::Reject => Err(MalformedReply::ScoreOutOfRange(score)),
    }
}
