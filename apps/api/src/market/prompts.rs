// Prompt constants for the job market module.

/// Market trend prompt. Replace `{query}` before sending.
pub const MARKET_TRENDS_PROMPT_TEMPLATE: &str = r#"You are an AI job market analyst with access to current market data and trends.

Given a job title or skill, provide a comprehensive market analysis.

Job Title/Skill: {query}

Return a JSON object with this schema:
{
  "industries": ["Industry with hiring demand", "Industry with growth potential", "Industry with emerging opportunities"],
  "top_skills": ["Complementary skill", "Complementary skill", "Emerging skill"],
  "tools": ["Popular tool", "Industry-standard tool"],
  "salary_ranges": {
    "entry_level": "X-Y range",
    "mid_level": "X-Y range",
    "senior_level": "X-Y range"
  },
  "trends": ["Market trend", "Growth trend", "Technology trend"],
  "certifications": ["Certification with value", "Certification for advancement"],
  "regions": ["High-demand region", "Emerging market", "Remote-friendly area"],
  "growth_outlook": "Overall market growth and future prospects",
  "key_insights": ["Insight about market dynamics", "Insight about skill demand", "Insight about career progression"]
}

Focus on current hiring conditions, realistic salary expectations by experience level,
and actionable insights for career development. Be specific and data-driven.
"#;
