//! Market trend summary for a job title or skill, produced by the model.

use serde::{Deserialize, Serialize};

use super::prompts::MARKET_TRENDS_PROMPT_TEMPLATE;
use crate::adapters::parse::{lenient_string, string_or_list, SalaryBands};
use crate::adapters::{run_structured, truncate_chars, AdapterOutcome, StructuredRecord};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;

pub const MAX_QUERY_CHARS: usize = 200;

const UNAVAILABLE: &str = "Analysis unavailable";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTrends {
    #[serde(default, deserialize_with = "string_or_list")]
    pub industries: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub top_skills: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tools: Vec<String>,
    #[serde(default)]
    pub salary_ranges: SalaryBands,
    #[serde(default, deserialize_with = "string_or_list")]
    pub trends: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub regions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub growth_outlook: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub key_insights: Vec<String>,
}

impl StructuredRecord for MarketTrends {
    const FEATURE: &'static str = "market_trends";

    fn fallback() -> Self {
        let unavailable = || vec![UNAVAILABLE.to_string()];
        Self {
            industries: unavailable(),
            top_skills: unavailable(),
            tools: unavailable(),
            salary_ranges: SalaryBands::unavailable(),
            trends: unavailable(),
            certifications: unavailable(),
            regions: unavailable(),
            growth_outlook: "Analysis unavailable - please try again".to_string(),
            key_insights: unavailable(),
        }
    }

    fn validate(self) -> Result<Self, String> {
        if self.industries.is_empty() && self.top_skills.is_empty() && self.trends.is_empty() {
            return Err("market trends reply has no industries, skills or trends".to_string());
        }
        Ok(self)
    }
}

pub fn build_prompt(query: &str) -> String {
    let query = truncate_chars(query.trim(), MAX_QUERY_CHARS);
    format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        MARKET_TRENDS_PROMPT_TEMPLATE.replace("{query}", query)
    )
}

pub async fn analyze_market_trends(
    llm: &dyn TextGenerator,
    query: &str,
) -> AdapterOutcome<MarketTrends> {
    let prompt = build_prompt(query);
    run_structured(llm, &prompt, &llm.default_config()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FailureKind, ScriptedGenerator};

    #[tokio::test]
    async fn test_parses_model_reply() {
        let reply = r#"```json
        {
          "industries": ["Fintech", "Healthcare"],
          "top_skills": "Python",
          "tools": ["Airflow"],
          "salary_ranges": {"entry_level": "70k-90k", "mid_level": "100k-130k"},
          "trends": ["LLM adoption"],
          "growth_outlook": "Strong",
          "key_insights": []
        }
        ```"#;
        let llm = ScriptedGenerator::replying(reply);
        let trends = analyze_market_trends(&llm, "Data Engineer")
            .await
            .into_record();
        assert_eq!(trends.industries, vec!["Fintech", "Healthcare"]);
        assert_eq!(trends.top_skills, vec!["Python"]);
        assert_eq!(trends.salary_ranges.senior_level, "N/A");
        assert!(trends.certifications.is_empty());
    }

    #[tokio::test]
    async fn test_failure_yields_exact_fallback() {
        let llm = ScriptedGenerator::failing(FailureKind::Auth);
        let trends = analyze_market_trends(&llm, "Data Engineer")
            .await
            .into_record();
        assert_eq!(trends, MarketTrends::fallback());
        assert_eq!(trends.industries, vec!["Analysis unavailable"]);
        assert_eq!(trends.regions, vec!["Analysis unavailable"]);
        assert_eq!(trends.growth_outlook, "Analysis unavailable - please try again");
        assert_eq!(trends.salary_ranges.entry_level, "N/A");
        assert_eq!(trends.salary_ranges.mid_level, "N/A");
        assert_eq!(trends.salary_ranges.senior_level, "N/A");
    }

    #[tokio::test]
    async fn test_salary_range_as_prose_is_kept() {
        let reply = r#"{"industries": ["Retail"], "top_skills": ["SQL"],
                        "salary_ranges": "$80k - $150k depending on seniority"}"#;
        let llm = ScriptedGenerator::replying(reply);
        let outcome = analyze_market_trends(&llm, "Analyst").await;
        assert!(!outcome.is_fallback());
        let trends = outcome.into_record();
        assert_eq!(trends.industries, vec!["Retail"]);
        assert_eq!(
            trends.salary_ranges.mid_level,
            "$80k - $150k depending on seniority"
        );
        assert_eq!(trends.salary_ranges.entry_level, "N/A");
    }

    #[tokio::test]
    async fn test_empty_object_is_malformed() {
        let llm = ScriptedGenerator::replying("{}");
        let outcome = analyze_market_trends(&llm, "x").await;
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_query_is_truncated() {
        let long = "a".repeat(500);
        let prompt = build_prompt(&long);
        assert!(prompt.contains(&"a".repeat(MAX_QUERY_CHARS)));
        assert!(!prompt.contains(&"a".repeat(MAX_QUERY_CHARS + 1)));
    }
}
