//! ATS readiness review of a resume on its own.

use serde::{Deserialize, Serialize};

use super::prompts::ATS_REVIEW_PROMPT_TEMPLATE;
use crate::adapters::parse::{lenient_number, lenient_string, percent_score, string_or_list};
use crate::adapters::{run_structured, truncate_chars, AdapterOutcome, StructuredRecord};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;

pub const MAX_RESUME_CHARS: usize = 2500;

const UNAVAILABLE: &str = "Unable to analyze resume right now. Please try again later.";

#[derive(Debug, Deserialize)]
struct RawAtsReview {
    #[serde(deserialize_with = "lenient_number")]
    ats_score: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    keyword_relevance: String,
    #[serde(default, deserialize_with = "string_or_list")]
    formatting_issues: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAtsReview")]
pub struct AtsReview {
    pub ats_score: u32,
    pub keyword_relevance: String,
    pub formatting_issues: Vec<String>,
    pub improvements: Vec<String>,
}

impl TryFrom<RawAtsReview> for AtsReview {
    type Error = String;

    fn try_from(raw: RawAtsReview) -> Result<Self, Self::Error> {
        Ok(Self {
            ats_score: percent_score(raw.ats_score)?,
            keyword_relevance: raw.keyword_relevance,
            formatting_issues: raw.formatting_issues,
            improvements: raw.improvements,
        })
    }
}

impl StructuredRecord for AtsReview {
    const FEATURE: &'static str = "ats_review";

    fn fallback() -> Self {
        Self {
            ats_score: 0,
            keyword_relevance: UNAVAILABLE.to_string(),
            formatting_issues: Vec::new(),
            improvements: vec![UNAVAILABLE.to_string()],
        }
    }

    fn validate(self) -> Result<Self, String> {
        if self.keyword_relevance.is_empty() && self.improvements.is_empty() {
            return Err("ATS review has neither keyword relevance nor improvements".to_string());
        }
        Ok(self)
    }
}

pub fn build_prompt(resume_text: &str) -> String {
    let prompt = ATS_REVIEW_PROMPT_TEMPLATE
        .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS));
    format!("{prompt}\n{JSON_ONLY_INSTRUCTION}")
}

pub async fn review_ats(llm: &dyn TextGenerator, resume_text: &str) -> AdapterOutcome<AtsReview> {
    let prompt = build_prompt(resume_text);
    run_structured(llm, &prompt, &llm.default_config()).await
}
