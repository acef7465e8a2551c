//! GitHub portfolio project suggestions for a target role.

use serde::{Deserialize, Serialize};

use super::prompts::PORTFOLIO_PROMPT_TEMPLATE;
use super::skills_for_prompt;
use crate::adapters::parse::{lenient_string, string_or_list};
use crate::adapters::{run_structured, truncate_chars, AdapterOutcome, StructuredRecord};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::skills::SkillSet;

pub const MAX_ROLE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioProject {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSuggestions {
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(default)]
    pub projects: Vec<PortfolioProject>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,
}

impl StructuredRecord for PortfolioSuggestions {
    const FEATURE: &'static str = "portfolio_suggestions";

    fn fallback() -> Self {
        Self {
            role: "Not specified".to_string(),
            projects: Vec::new(),
            note: "Portfolio suggestions are unavailable right now. Please try again later."
                .to_string(),
        }
    }

    /// Drops untitled projects; a reply with none left is malformed.
    fn validate(mut self) -> Result<Self, String> {
        self.projects.retain(|project| !project.title.is_empty());
        if self.projects.is_empty() {
            return Err("portfolio reply has no titled projects".to_string());
        }
        Ok(self)
    }
}

pub fn build_prompt(skills: &SkillSet, target_role: &str) -> String {
    let prompt = PORTFOLIO_PROMPT_TEMPLATE
        .replace("{target_role}", truncate_chars(target_role.trim(), MAX_ROLE_CHARS))
        .replace("{user_skills}", &skills_for_prompt(skills));
    format!("{prompt}\n{JSON_ONLY_INSTRUCTION}")
}

pub async fn portfolio_suggestions(
    llm: &dyn TextGenerator,
    skills: &SkillSet,
    target_role: &str,
) -> AdapterOutcome<PortfolioSuggestions> {
    let prompt = build_prompt(skills, target_role);
    run_structured(llm, &prompt, &llm.default_config()).await
}
