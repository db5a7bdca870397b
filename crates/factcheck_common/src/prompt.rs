//! System prompts and screen profiles.
//!
//! The easy and professional screens differ only in the instruction they send
//! and whether the model selector is offered.

use crate::model::ModelId;
use serde::{Deserialize, Serialize};

const FACT_CHECK_PROMPT: &str = "You are a fact-checking AI. Analyze the following text for factual accuracy.
Respond in a JSON format with two keys:
1. \"score\": An integer from 0 (completely false) to 100 (completely true).
2. \"analysis\": A string containing your detailed analysis. In your analysis, use markdown for formatting. For example, use ** for bolding important corrections or confirmations.";

const MEDIA_LITERACY_PROMPT: &str = "You are a media literacy analysis AI. Analyze the following text for factual accuracy and potential misinformation.
Respond in a JSON format with two keys:
1. \"score\": An integer from 0 (completely false/misleading) to 100 (completely true/reliable).
2. \"analysis\": A string containing your detailed analysis. In your analysis, use markdown for formatting. For example, use ** for bolding important corrections or confirmations.";

/// Which fixed instruction a screen sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptVariant {
    FactCheck,
    MediaLiteracy,
}

impl PromptVariant {
    pub fn system_prompt(&self) -> &'static str {
        match self {
            PromptVariant::FactCheck => FACT_CHECK_PROMPT,
            PromptVariant::MediaLiteracy => MEDIA_LITERACY_PROMPT,
        }
    }
}

/// Configuration of one check screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenProfile {
    pub name: &'static str,
    pub prompt: PromptVariant,
    pub default_model: ModelId,
    /// Whether the user may pick a model other than the default
    pub model_selectable: bool,
    /// Shown when the text to check is blank
    pub empty_input_message: &'static str,
}

impl ScreenProfile {
    /// Quick check: media-literacy prompt, fixed model
    pub fn easy() -> Self {
        Self {
            name: "easy",
            prompt: PromptVariant::MediaLiteracy,
            default_model: ModelId::default(),
            model_selectable: false,
            empty_input_message: "Please enter or select text to analyze.",
        }
    }

    /// Detailed check: fact-check prompt, model selector enabled
    pub fn professional() -> Self {
        Self {
            name: "professional",
            prompt: PromptVariant::FactCheck,
            default_model: ModelId::default(),
            model_selectable: true,
            empty_input_message: "Please enter or select text to fact-check.",
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Self::easy()),
            "professional" | "pro" => Some(Self::professional()),
            _ => None,
        }
    }

    /// Model actually used for a request from this screen
    pub fn resolve_model(&self, requested: Option<&ModelId>) -> ModelId {
        match requested {
            Some(model) if self.model_selectable => model.clone(),
            _ => self.default_model.clone(),
        }
    }
}
