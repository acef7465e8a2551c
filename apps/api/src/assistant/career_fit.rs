//! Model-judged career fit against trending roles.
//!
//! Complements the deterministic dataset score in `market::fit`; the two are stored in
//! separate session slots and never blended.

use serde::{Deserialize, Serialize};

use super::prompts::CAREER_FIT_ASSESSMENT_PROMPT_TEMPLATE;
use super::skills_for_prompt;
use crate::adapters::parse::{lenient_number, lenient_string, percent_score, string_or_list};
use crate::adapters::{run_structured, AdapterOutcome, StructuredRecord};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::market::fit::FitLevel;
use crate::models::profile::ExperienceLevel;
use crate::skills::SkillSet;

const UNAVAILABLE: &str = "Analysis unavailable";

#[derive(Debug, Deserialize)]
struct RawAssessment {
    #[serde(deserialize_with = "lenient_number")]
    fit_score: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    level: String,
    #[serde(default, deserialize_with = "string_or_list")]
    best_fit_roles: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    strengths: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    gaps: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssessment")]
pub struct CareerFitAssessment {
    pub fit_score: u32,
    pub level: String,
    pub best_fit_roles: Vec<String>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
}

impl TryFrom<RawAssessment> for CareerFitAssessment {
    type Error = String;

    fn try_from(raw: RawAssessment) -> Result<Self, Self::Error> {
        let fit_score = percent_score(raw.fit_score)?;
        // A missing band is derived from the score with the dataset thresholds.
        let level = if raw.level.is_empty() {
            FitLevel::from_score(fit_score).label().to_string()
        } else {
            raw.level
        };
        Ok(Self {
            fit_score,
            level,
            best_fit_roles: raw.best_fit_roles,
            strengths: raw.strengths,
            gaps: raw.gaps,
            recommendations: raw.recommendations,
        })
    }
}

impl StructuredRecord for CareerFitAssessment {
    const FEATURE: &'static str = "career_fit_assessment";

    fn fallback() -> Self {
        Self {
            fit_score: 0,
            level: "Unavailable".to_string(),
            best_fit_roles: vec![UNAVAILABLE.to_string()],
            strengths: vec![UNAVAILABLE.to_string()],
            gaps: vec![UNAVAILABLE.to_string()],
            recommendations: vec!["Please try again or contact support".to_string()],
        }
    }

    fn validate(self) -> Result<Self, String> {
        if self.best_fit_roles.is_empty() {
            return Err("assessment reply has no best_fit_roles".to_string());
        }
        Ok(self)
    }
}

pub fn build_prompt(skills: &SkillSet, experience_level: ExperienceLevel) -> String {
    let prompt = CAREER_FIT_ASSESSMENT_PROMPT_TEMPLATE
        .replace("{user_skills}", &skills_for_prompt(skills))
        .replace("{experience_level}", experience_level.as_str());
    format!("{prompt}\n{JSON_ONLY_INSTRUCTION}")
}

pub async fn assess_career_fit(
    llm: &dyn TextGenerator,
    skills: &SkillSet,
    experience_level: ExperienceLevel,
) -> AdapterOutcome<CareerFitAssessment> {
    let prompt = build_prompt(skills, experience_level);
    let config = llm.default_config().with_temperature(0.3);
    run_structured(llm, &prompt, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FailureKind, ScriptedGenerator};

    fn skills() -> SkillSet {
        SkillSet::from(vec!["Python".to_string(), "AWS".to_string()])
    }

    #[tokio::test]
    async fn test_missing_level_derived_from_score() {
        let reply = r#"{"fit_score": "64", "best_fit_roles": ["Cloud Data Engineer"]}"#;
        let llm = ScriptedGenerator::replying(reply);
        let assessment = assess_career_fit(&llm, &skills(), ExperienceLevel::Mid)
            .await
            .into_record();
        assert_eq!(assessment.fit_score, 64);
        assert_eq!(assessment.level, "Good");
    }

    #[tokio::test]
    async fn test_model_level_is_kept() {
        let reply = r#"{"fit_score": 0.9, "level": "Excellent", "best_fit_roles": "ML Engineer"}"#;
        let llm = ScriptedGenerator::replying(reply);
        let assessment = assess_career_fit(&llm, &skills(), ExperienceLevel::Senior)
            .await
            .into_record();
        assert_eq!(assessment.fit_score, 90);
        assert_eq!(assessment.level, "Excellent");
        assert_eq!(assessment.best_fit_roles, vec!["ML Engineer"]);
    }

    #[tokio::test]
    async fn test_failure_yields_exact_fallback() {
        let llm = ScriptedGenerator::failing(FailureKind::EmptyResponse);
        let assessment = assess_career_fit(&llm, &skills(), ExperienceLevel::Entry)
            .await
            .into_record();
        assert_eq!(assessment.fit_score, 0);
        assert_eq!(assessment.level, "Unavailable");
        assert_eq!(assessment.best_fit_roles, vec!["Analysis unavailable"]);
        assert_eq!(assessment.strengths, vec!["Analysis unavailable"]);
        assert_eq!(assessment.gaps, vec!["Analysis unavailable"]);
        assert_eq!(
            assessment.recommendations,
            vec!["Please try again or contact support"]
        );
    }

    #[test]
    fn test_prompt_carries_level() {
        let prompt = build_prompt(&skills(), ExperienceLevel::Lead);
        assert!(prompt.contains("Skills: AWS, Python\n"));
        assert!(prompt.contains("Experience Level: Lead\n"));
    }
}
