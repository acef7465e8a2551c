//! Learning roadmap: next skills, target roles and a plan to get there.

use serde::{Deserialize, Serialize};

use super::prompts::LEARNING_ROADMAP_PROMPT_TEMPLATE;
use super::skills_for_prompt;
use crate::adapters::parse::{lenient_string, string_or_list};
use crate::adapters::{run_structured, truncate_chars, AdapterOutcome, StructuredRecord};
use crate::llm_client::prompts::{COACH_TONE_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;
use crate::skills::SkillSet;

pub const MAX_GOALS_CHARS: usize = 500;

const UNAVAILABLE: &str = "Analysis unavailable";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRoadmap {
    #[serde(default, deserialize_with = "lenient_string")]
    pub career_path: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub next_skills: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub target_roles: Vec<String>,
    /// Steps; a single prose plan arrives as one step.
    #[serde(default, deserialize_with = "string_or_list")]
    pub learning_plan: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timeline: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub salary_progression: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub networking_tips: Vec<String>,
}

impl StructuredRecord for LearningRoadmap {
    const FEATURE: &'static str = "learning_roadmap";

    fn fallback() -> Self {
        Self {
            career_path: "Career roadmap unavailable - please try again".to_string(),
            next_skills: vec![UNAVAILABLE.to_string()],
            target_roles: vec![UNAVAILABLE.to_string()],
            learning_plan: vec!["Please try again or contact support".to_string()],
            timeline: UNAVAILABLE.to_string(),
            salary_progression: UNAVAILABLE.to_string(),
            networking_tips: vec![UNAVAILABLE.to_string()],
        }
    }

    fn validate(self) -> Result<Self, String> {
        if self.career_path.is_empty() || self.next_skills.is_empty() {
            return Err("roadmap reply lacks career_path or next_skills".to_string());
        }
        Ok(self)
    }
}

pub fn build_prompt(skills: &SkillSet, career_goals: &str) -> String {
    let prompt = LEARNING_ROADMAP_PROMPT_TEMPLATE
        .replace("{user_skills}", &skills_for_prompt(skills))
        .replace("{career_goals}", truncate_chars(career_goals.trim(), MAX_GOALS_CHARS));
    format!("{prompt}\n{COACH_TONE_INSTRUCTION}\n{JSON_ONLY_INSTRUCTION}")
}

pub async fn learning_roadmap(
    llm: &dyn TextGenerator,
    skills: &SkillSet,
    career_goals: &str,
) -> AdapterOutcome<LearningRoadmap> {
    let prompt = build_prompt(skills, career_goals);
    run_structured(llm, &prompt, &llm.default_config()).await
}
