//! Resume Analysis: upload and extraction, plus the LLM-backed resume features.

use reqwest::Url;

use crate::skills::SkillSet;

pub mod ats;
pub mod handlers;
pub mod insight;
pub mod job_match;
pub mod prompts;
pub mod summary;

const LINKEDIN_JOBS_URL: &str = "https://www.linkedin.com/jobs/";
const LINKEDIN_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/";
const LINKEDIN_KEYWORD_LIMIT: usize = 5;

/// LinkedIn job search prefilled with the first few skills.
pub fn linkedin_search_url(skills: &SkillSet) -> String {
    if skills.is_empty() {
        return LINKEDIN_JOBS_URL.to_string();
    }
    let keywords = skills
        .iter()
        .take(LINKEDIN_KEYWORD_LIMIT)
        .collect::<Vec<_>>()
        .join(" ");
    match Url::parse_with_params(LINKEDIN_SEARCH_URL, &[("keywords", keywords.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => LINKEDIN_JOBS_URL.to_string(),
    }
}
