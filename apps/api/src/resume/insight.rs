//! Full career-coach assessment of a resume.
//!
//! Resumes longer than the configured chunk size are condensed first: the opening
//! `SUMMARY_INPUT_CHARS` characters are summarised, and the summary is analysed instead.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::prompts::{RESUME_INSIGHT_PROMPT_TEMPLATE, RESUME_SUMMARY_PROMPT_TEMPLATE};
use crate::adapters::parse::{lenient_string, string_or_list, SalaryBands};
use crate::adapters::{
    run_structured, run_text, truncate_chars, AdapterOutcome, StructuredRecord, TextFeature,
};
use crate::llm_client::prompts::{COACH_TONE_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;

pub const SUMMARY_INPUT_CHARS: usize = 15_000;

const RESUME_CONDENSE: TextFeature = TextFeature {
    name: "resume_condense",
    fallback: "",
};

const UNAVAILABLE: &str = "Analysis unavailable";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeInsight {
    #[serde(default, deserialize_with = "lenient_string")]
    pub candidate_summary: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub key_strengths: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub skill_gaps: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub suitable_roles: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub career_level: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience_quality: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub learning_recommendations: Vec<String>,
    #[serde(default)]
    pub salary_estimate: SalaryBands,
    #[serde(default, deserialize_with = "lenient_string")]
    pub interview_readiness: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub portfolio_suggestions: Vec<String>,
}

impl StructuredRecord for ResumeInsight {
    const FEATURE: &'static str = "resume_insight";

    fn fallback() -> Self {
        Self {
            candidate_summary: "Resume analysis could not be completed due to technical issues"
                .to_string(),
            key_strengths: vec![UNAVAILABLE.to_string()],
            skill_gaps: vec![UNAVAILABLE.to_string()],
            suitable_roles: vec![UNAVAILABLE.to_string()],
            career_level: "Unknown".to_string(),
            experience_quality: UNAVAILABLE.to_string(),
            learning_recommendations: vec!["Please try again or contact support".to_string()],
            salary_estimate: SalaryBands::unavailable(),
            interview_readiness: UNAVAILABLE.to_string(),
            portfolio_suggestions: vec![UNAVAILABLE.to_string()],
        }
    }

    fn validate(self) -> Result<Self, String> {
        if self.candidate_summary.is_empty() {
            return Err("insight reply has no candidate_summary".to_string());
        }
        if self.key_strengths.is_empty() && self.suitable_roles.is_empty() {
            return Err("insight reply has neither strengths nor suitable roles".to_string());
        }
        Ok(self)
    }
}

fn insight_prompt(resume_text: &str) -> String {
    format!(
        "{}\n{COACH_TONE_INSTRUCTION}\n{JSON_ONLY_INSTRUCTION}",
        RESUME_INSIGHT_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
    )
}

fn condense_prompt(resume_text: &str) -> String {
    RESUME_SUMMARY_PROMPT_TEMPLATE.replace(
        "{resume_text}",
        truncate_chars(resume_text, SUMMARY_INPUT_CHARS),
    )
}

/// Analyses `resume_text`, condensing it first when it exceeds `chunk_size` characters.
pub async fn analyze_resume(
    llm: &dyn TextGenerator,
    resume_text: &str,
    chunk_size: usize,
) -> AdapterOutcome<ResumeInsight> {
    let config = llm.default_config();
    if resume_text.chars().count() <= chunk_size {
        return run_structured(llm, &insight_prompt(resume_text), &config).await;
    }

    info!(chunk_size, "Resume exceeds chunk size; condensing before analysis");
    match run_text(llm, &RESUME_CONDENSE, &condense_prompt(resume_text), &config).await {
        AdapterOutcome::Parsed(summary) => {
            run_structured(llm, &insight_prompt(&summary), &config).await
        }
        AdapterOutcome::Fallback(reason) => AdapterOutcome::Fallback(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FallbackReason;
    use crate::llm_client::testing::{FailureKind, Script, ScriptedGenerator};

    const REPLY: &str = r#"```json
    {
      "candidate_summary": "Backend engineer with five years of Python.",
      "key_strengths": ["API design", "PostgreSQL tuning"],
      "skill_gaps": "Kubernetes",
      "suitable_roles": ["Senior Backend Engineer (Senior)"],
      "career_level": "Senior",
      "salary_estimate": {"entry_level": "60k", "mid_level": "90k", "senior_level": "130k"}
    }
    ```"#;

    #[tokio::test]
    async fn test_short_resume_single_call() {
        let llm = ScriptedGenerator::replying(REPLY);
        let insight = analyze_resume(&llm, "Python engineer", 30_000)
            .await
            .into_record();
        assert_eq!(llm.call_count(), 1);
        assert_eq!(insight.career_level, "Senior");
        assert_eq!(insight.skill_gaps, vec!["Kubernetes"]);
        assert_eq!(insight.salary_estimate.senior_level, "130k");
        assert!(insight.portfolio_suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_long_resume_is_condensed_first() {
        let llm = ScriptedGenerator::new(vec![
            Script::Reply("CONDENSED SUMMARY".to_string()),
            Script::Reply(REPLY.to_string()),
        ]);
        let resume = "y".repeat(40);
        let outcome = analyze_resume(&llm, &resume, 10).await;

        assert!(!outcome.is_fallback());
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].starts_with("Summarize this resume"));
        assert!(prompts[1].contains("CONDENSED SUMMARY"));
        assert!(!prompts[1].contains(&resume));
    }

    #[tokio::test]
    async fn test_condense_failure_skips_analysis() {
        let llm = ScriptedGenerator::failing(FailureKind::MissingCredential);
        let outcome = analyze_resume(&llm, &"z".repeat(100), 10).await;
        assert_eq!(llm.call_count(), 1);
        assert_eq!(
            outcome,
            AdapterOutcome::Fallback(FallbackReason::Llm {
                error: "missing_credential".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_failure_yields_exact_fallback() {
        let llm = ScriptedGenerator::failing(FailureKind::Auth);
        let insight = analyze_resume(&llm, "resume", 30_000).await.into_record();
        assert_eq!(
            insight.candidate_summary,
            "Resume analysis could not be completed due to technical issues"
        );
        assert_eq!(insight.key_strengths, vec!["Analysis unavailable"]);
        assert_eq!(insight.skill_gaps, vec!["Analysis unavailable"]);
        assert_eq!(insight.suitable_roles, vec!["Analysis unavailable"]);
        assert_eq!(insight.career_level, "Unknown");
        assert_eq!(insight.experience_quality, "Analysis unavailable");
        assert_eq!(
            insight.learning_recommendations,
            vec!["Please try again or contact support"]
        );
        assert_eq!(insight.salary_estimate, SalaryBands::unavailable());
        assert_eq!(insight.interview_readiness, "Analysis unavailable");
        assert_eq!(insight.portfolio_suggestions, vec!["Analysis unavailable"]);
    }
}
