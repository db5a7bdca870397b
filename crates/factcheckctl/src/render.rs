//! Terminal rendering of check results.
//!
//! Score badge in the bucket color, analysis with `**bold**` spans rendered,
//! and the fallback notice underneath. ASCII framing only.

use chrono::{DateTime, Utc};
use factcheck_common::markdown::{segments, Segment};
use factcheck_common::model::selector_models;
use factcheck_common::{rate, CheckResult, CheckSession, ModelId, Rating};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Machine-readable report for --json
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub screen: &'a str,
    pub model: String,
    pub status: &'static str,
    pub score: Option<i64>,
    pub rating: Rating,
    pub analysis: &'a str,
    pub used_fallback: bool,
    pub message: Option<&'a str>,
    pub checked_at: DateTime<Utc>,
}

impl<'a> CheckReport<'a> {
    pub fn from_session(screen: &'a str, model: &ModelId, session: &'a CheckSession) -> Self {
        let result = session.result();
        let status = match session {
            CheckSession::Completed { .. } => "completed",
            CheckSession::NotImplemented { .. } => "not-implemented",
            CheckSession::Failed { .. } => "failed",
            CheckSession::Invalid { .. } => "invalid",
            CheckSession::Idle => "idle",
            CheckSession::InFlight { .. } => "in-flight",
        };
        let score = result.and_then(CheckResult::score);
        Self {
            screen,
            model: model.to_string(),
            status,
            score,
            rating: rate(score),
            analysis: session.output_text(),
            used_fallback: result.map(CheckResult::used_fallback).unwrap_or(false),
            message: session.message(),
            checked_at: Utc::now(),
        }
    }
}

/// Badge such as `[Likely Factual] 64/100`
pub fn badge(score: Option<i64>, color: bool) -> String {
    let rating = rate(score);
    let text = match score {
        Some(score) => format!("[{}] {}/100", rating.label, score),
        None => format!("[{}]", rating.label),
    };
    if color {
        let (r, g, b) = rating.bucket.rgb();
        text.truecolor(r, g, b).bold().to_string()
    } else {
        text
    }
}

/// Analysis text with bold spans styled (or left with markers when uncolored)
pub fn analysis(text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(t) => t.to_string(),
            Segment::Bold(t) => t.bold().to_string(),
        })
        .collect()
}

pub fn result(result: &CheckResult, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&badge(result.score(), color));
    out.push_str("\n\n");
    out.push_str(&analysis(result.analysis(), color));
    out.push('\n');
    if let Some(notice) = result.notice() {
        out.push('\n');
        out.push_str(&note(notice, color));
        out.push('\n');
    }
    out
}

pub fn session(session: &CheckSession, color: bool) -> String {
    match session {
        CheckSession::Completed { result: r, .. } => result(r, color),
        CheckSession::NotImplemented { message, .. } => format!("{}\n", message),
        CheckSession::Failed { message, .. } | CheckSession::Invalid { message } => {
            format!("{}\n", error(message, color))
        }
        CheckSession::Idle | CheckSession::InFlight { .. } => String::new(),
    }
}

pub fn note(message: &str, color: bool) -> String {
    if color {
        format!("[NOTE] {}", message.yellow())
    } else {
        format!("[NOTE] {}", message)
    }
}

pub fn error(message: &str, color: bool) -> String {
    if color {
        format!("[ERROR] {}", message.red())
    } else {
        format!("[ERROR] {}", message)
    }
}

/// Model selector listing
pub fn models() -> String {
    let mut out = String::new();
    for model in selector_models() {
        let label = model.label().unwrap_or_default();
        let status = if model.is_supported() {
            "available"
        } else {
            "not yet implemented"
        };
        let default = if model == ModelId::default() { " (default)" } else { "" };
        out.push_str(&format!("  {:<12} {:<26} {}{}\n", model.as_str(), label, status, default));
    }
    out
}
