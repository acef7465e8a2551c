//! Resume vs job description comparison.

use serde::{Deserialize, Serialize};

use super::prompts::RESUME_JOB_MATCH_PROMPT_TEMPLATE;
use crate::adapters::parse::{lenient_number, lenient_string, string_or_list, unit_score};
use crate::adapters::{run_structured, truncate_chars, AdapterOutcome, StructuredRecord};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;

pub const MAX_RESUME_CHARS: usize = 8000;
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 4000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeJobMatch {
    #[serde(deserialize_with = "lenient_number")]
    pub relevance_score: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub ats_score: f64,
    #[serde(default, alias = "key_matches", deserialize_with = "string_or_list")]
    pub matched_skills: Vec<String>,
    #[serde(default, alias = "missing_keywords", deserialize_with = "string_or_list")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub formatting_feedback: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
}

impl StructuredRecord for ResumeJobMatch {
    const FEATURE: &'static str = "resume_job_match";

    fn fallback() -> Self {
        Self {
            relevance_score: 0.0,
            ats_score: 0.0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            formatting_feedback: "Analysis could not be completed due to technical issues"
                .to_string(),
            summary: "Analysis unavailable - please try again".to_string(),
        }
    }

    fn validate(mut self) -> Result<Self, String> {
        self.relevance_score = unit_score(self.relevance_score)?;
        self.ats_score = unit_score(self.ats_score)?;
        Ok(self)
    }
}

pub fn build_prompt(resume_text: &str, job_description: &str) -> String {
    let prompt = RESUME_JOB_MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS))
        .replace(
            "{job_description}",
            truncate_chars(job_description.trim(), MAX_JOB_DESCRIPTION_CHARS),
        );
    format!("{prompt}\n{JSON_ONLY_INSTRUCTION}")
}

pub async fn analyze_resume_vs_job(
    llm: &dyn TextGenerator,
    resume_text: &str,
    job_description: &str,
) -> AdapterOutcome<ResumeJobMatch> {
    let prompt = build_prompt(resume_text, job_description);
    let config = llm.default_config().with_temperature(0.3);
    run_structured(llm, &prompt, &config).await
}
