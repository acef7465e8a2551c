//! Free-text resume features: the enhanced summary and job-description-from-URL.

use super::prompts::{ENHANCED_SUMMARY_PROMPT_TEMPLATE, JOB_DESCRIPTION_FROM_URL_PROMPT_TEMPLATE};
use crate::adapters::{run_text, truncate_chars, AdapterOutcome, TextFeature};
use crate::llm_client::TextGenerator;

pub const MAX_RESUME_CHARS: usize = 2000;
pub const MAX_URL_CHARS: usize = 2000;

pub const ENHANCED_SUMMARY: TextFeature = TextFeature {
    name: "enhanced_summary",
    fallback: "Enhanced summary is unavailable right now. Please try again later.",
};

pub const JOB_DESCRIPTION_FROM_URL: TextFeature = TextFeature {
    name: "job_description_from_url",
    fallback: "Unable to extract job description from URL. Please paste the job description manually.",
};

pub async fn enhanced_summary(llm: &dyn TextGenerator, resume_text: &str) -> AdapterOutcome<String> {
    let prompt = ENHANCED_SUMMARY_PROMPT_TEMPLATE
        .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS));
    run_text(llm, &ENHANCED_SUMMARY, &prompt, &llm.default_config()).await
}

pub async fn job_description_from_url(llm: &dyn TextGenerator, url: &str) -> AdapterOutcome<String> {
    let prompt = JOB_DESCRIPTION_FROM_URL_PROMPT_TEMPLATE
        .replace("{url}", truncate_chars(url.trim(), MAX_URL_CHARS));
    run_text(llm, &JOB_DESCRIPTION_FROM_URL, &prompt, &llm.default_config()).await
}
