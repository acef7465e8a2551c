//! Prompt/response adapters shared by every LLM-backed feature.
//!
//! format prompt (inputs truncated) -> `TextGenerator::generate` -> lenient decode -> validate.
//! Any LLM failure or decode failure yields `AdapterOutcome::Fallback`; callers resolve that
//! to the feature's static record. There is no partial success: a record is either entirely
//! from the model or entirely the fallback.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::llm_client::{GenerationConfig, LlmError, TextGenerator};

pub mod parse;

use parse::extract_json_block;

/// A structured record produced by one feature.
pub trait StructuredRecord: DeserializeOwned + Serialize + Sized {
    /// Feature name used in logs and session slots.
    const FEATURE: &'static str;

    /// The static record served whenever the model cannot be used.
    fn fallback() -> Self;

    /// Normalises a decoded record (clamps scores, checks required content).
    fn validate(self) -> Result<Self, String> {
        Ok(self)
    }
}

/// A free-text feature: a name plus its canned reply.
#[derive(Debug, Clone, Copy)]
pub struct TextFeature {
    pub name: &'static str,
    pub fallback: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The LLM call itself failed; `error` is the `LlmError::kind()` label.
    Llm { error: String },
    /// The model replied but the reply could not be decoded into the record.
    MalformedResponse { detail: String },
}

impl FallbackReason {
    pub fn label(&self) -> &str {
        match self {
            FallbackReason::Llm { error } => error,
            FallbackReason::MalformedResponse { .. } => "malformed_response",
        }
    }
}

impl From<&LlmError> for FallbackReason {
    fn from(error: &LlmError) -> Self {
        FallbackReason::Llm {
            error: error.kind().to_string(),
        }
    }
}

/// Tagged result of one adapter call.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome<T> {
    Parsed(T),
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Model,
    Fallback,
    /// Computed locally from the job market dataset; no model involved.
    Dataset,
}

/// What the API returns for every LLM-backed feature.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisEnvelope<T> {
    pub source: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    pub result: T,
}

impl<T> AnalysisEnvelope<T> {
    pub fn from_dataset(result: T) -> Self {
        Self {
            source: Provenance::Dataset,
            fallback_reason: None,
            result,
        }
    }
}

impl<T> AdapterOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AdapterOutcome::Fallback(_))
    }

    /// Resolves a fallback with the supplied record while keeping the provenance.
    pub fn resolve(self, fallback: impl FnOnce() -> T) -> AnalysisEnvelope<T> {
        match self {
            AdapterOutcome::Parsed(result) => AnalysisEnvelope {
                source: Provenance::Model,
                fallback_reason: None,
                result,
            },
            AdapterOutcome::Fallback(reason) => AnalysisEnvelope {
                source: Provenance::Fallback,
                fallback_reason: Some(reason),
                result: fallback(),
            },
        }
    }
}

impl<T: StructuredRecord> AdapterOutcome<T> {
    pub fn into_record(self) -> T {
        match self {
            AdapterOutcome::Parsed(record) => record,
            AdapterOutcome::Fallback(_) => T::fallback(),
        }
    }

    pub fn into_envelope(self) -> AnalysisEnvelope<T> {
        self.resolve(T::fallback)
    }
}

impl AdapterOutcome<String> {
    pub fn into_text_envelope(self, feature: &TextFeature) -> AnalysisEnvelope<String> {
        self.resolve(|| feature.fallback.to_string())
    }
}

/// Decodes a raw model reply into `T`.
pub fn parse_record<T: StructuredRecord>(raw: &str) -> Result<T, String> {
    let block = extract_json_block(raw).ok_or_else(|| "no JSON object in reply".to_string())?;
    let record: T = serde_json::from_str(block).map_err(|e| e.to_string())?;
    record.validate()
}

fn fall_back<T>(feature: &str, reason: FallbackReason) -> AdapterOutcome<T> {
    warn!(
        feature,
        kind = reason.label(),
        "LLM feature degraded to fallback"
    );
    AdapterOutcome::Fallback(reason)
}

/// Runs a structured feature end to end.
pub async fn run_structured<T: StructuredRecord>(
    llm: &dyn TextGenerator,
    prompt: &str,
    config: &GenerationConfig,
) -> AdapterOutcome<T> {
    let raw = match llm.generate(prompt, config).await {
        Ok(raw) => raw,
        Err(e) => return fall_back(T::FEATURE, FallbackReason::from(&e)),
    };

    match parse_record::<T>(&raw) {
        Ok(record) => {
            debug!(feature = T::FEATURE, "LLM record decoded");
            AdapterOutcome::Parsed(record)
        }
        Err(detail) => fall_back(T::FEATURE, FallbackReason::MalformedResponse { detail }),
    }
}

/// Runs a free-text feature. Whitespace-only replies count as malformed.
pub async fn run_text(
    llm: &dyn TextGenerator,
    feature: &TextFeature,
    prompt: &str,
    config: &GenerationConfig,
) -> AdapterOutcome<String> {
    match llm.generate(prompt, config).await {
        Ok(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                fall_back(
                    feature.name,
                    FallbackReason::MalformedResponse {
                        detail: "empty text".to_string(),
                    },
                )
            } else {
                AdapterOutcome::Parsed(text.to_string())
            }
        }
        Err(e) => fall_back(feature.name, FallbackReason::from(&e)),
    }
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
