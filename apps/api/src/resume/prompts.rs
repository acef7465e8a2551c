// Prompt templates for the resume analysis features.
// Placeholders in braces are replaced with `str::replace` before sending.

pub const RESUME_JOB_MATCH_PROMPT_TEMPLATE: &str = r#"You are an AI career analyst.

Compare this candidate's resume and the provided job description.
Evaluate:

1. Content Relevance: how well does the resume match the job requirements?
2. ATS Compatibility: is the resume formatted for Applicant Tracking Systems?
3. Matching Skills: skills found both in the resume and the job.
4. Missing Skills: skills present in the job but not in the resume.
5. Formatting Feedback: suggestions to make it more readable and ATS-friendly.
6. Two numeric scores between 0 and 1: relevance_score and ats_score.

Return JSON with:
{
  "relevance_score": float,
  "ats_score": float,
  "matched_skills": [skills],
  "missing_skills": [skills],
  "formatting_feedback": str,
  "summary": str
}

Resume Text:
{resume_text}

Job Description:
{job_description}
"#;

pub const ATS_REVIEW_PROMPT_TEMPLATE: &str = r#"You are an expert resume reviewer and ATS specialist.
Evaluate the following resume for:
1. Content and keyword relevance to job markets.
2. Formatting, section clarity, and ATS compatibility.

Return JSON with:
{
  "ats_score": integer between 0 and 100,
  "keyword_relevance": "One or two sentences on keyword coverage",
  "formatting_issues": ["Issue", "Issue"],
  "improvements": ["Concrete improvement", "Concrete improvement", "Concrete improvement"]
}

Resume text:
{resume_text}
"#;

pub const RESUME_SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize this resume in 500 words or less, focusing on:
- Key skills and technologies
- Work experience and roles
- Education and certifications
- Notable achievements

Resume text:
{resume_text}
"#;

pub const RESUME_INSIGHT_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and AI analyst. Analyze the following resume and provide a structured assessment.

RESUME TEXT:
{resume_text}

Provide your analysis in the following JSON format:

{
  "candidate_summary": "Brief 2-3 sentence summary of the candidate",
  "key_strengths": ["Strength with specific examples", "Strength with specific examples", "Strength with specific examples"],
  "skill_gaps": ["Missing skill with explanation", "Missing skill with explanation"],
  "suitable_roles": ["Role with readiness level (Entry/Mid/Senior)", "Role with readiness level"],
  "career_level": "Entry/Mid/Senior/Lead",
  "experience_quality": "Assessment of experience depth and relevance",
  "learning_recommendations": ["Skill to learn with resource suggestion", "Skill to learn with resource suggestion"],
  "salary_estimate": {
    "entry_level": "X-Y range",
    "mid_level": "X-Y range",
    "senior_level": "X-Y range"
  },
  "interview_readiness": "Assessment of readiness for technical interviews",
  "portfolio_suggestions": ["Project idea", "Project idea", "Project idea"]
}

Focus on:
- Technical skills and their depth
- Industry experience and relevance
- Leadership and soft skills
- Career progression and trajectory
- Market demand for their skills
"#;

pub const ENHANCED_SUMMARY_PROMPT_TEMPLATE: &str = r#"Create an enhanced, professional resume summary for this candidate.
Make it compelling, ATS-friendly, and highlight key achievements.

Resume text: {resume_text}

Return a professional summary (2-3 sentences) that would impress recruiters. Return only the summary text."#;

pub const JOB_DESCRIPTION_FROM_URL_PROMPT_TEMPLATE: &str = r#"You are a web scraping assistant. Extract the job description from this URL.

URL: {url}

1. Read the page content
2. Extract the main job description text
3. Focus on job requirements, responsibilities, and qualifications
4. Remove any navigation, ads, or irrelevant content
5. Return only the clean job description text

If you cannot access the URL, return "Unable to access URL. Please try a different link or paste the job description manually."
"#;
