//! Axum route handlers for the Job Market API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::certifications::{certification_recommendations, CertificationMatch};
use super::queries::{
    GeographicAnalysis, IndustryTrends, JobTitleAnalysis, SalaryAnalysis, SalaryFilter,
    SkillDemand, SummaryInsights, DEFAULT_TOP_SKILLS,
};
use super::trends::{analyze_market_trends, MarketTrends};
use super::JobMarketRecord;
use crate::adapters::AnalysisEnvelope;
use crate::errors::AppError;
use crate::session::{AnalysisKind, CurrentSkills, SkillSource};
use crate::skills::{SkillSet, DEFAULT_VOCABULARY};
use crate::state::AppState;

const MAX_TOP_SKILLS: usize = 100;
const MAX_LISTED_MATCHES: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SkillDemandQuery {
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketSkillsRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendsRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub skills: SkillSet,
    pub total_matches: usize,
    /// First postings in dataset order.
    pub jobs: Vec<JobMarketRecord>,
}

#[derive(Debug, Serialize)]
pub struct CertificationsResponse {
    pub skills: SkillSet,
    pub recommendations: Vec<CertificationMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Dataset queries
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/market/overview
pub async fn handle_overview(
    State(state): State<AppState>,
) -> Result<Json<SummaryInsights>, AppError> {
    state
        .market
        .summary_insights()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No job market data is loaded".to_string()))
}

/// GET /api/v1/market/salaries?experience_level=&industry=
pub async fn handle_salaries(
    State(state): State<AppState>,
    Query(filter): Query<SalaryFilter>,
) -> Result<Json<SalaryAnalysis>, AppError> {
    state
        .market
        .salary_analysis(&filter)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No postings match the salary filter".to_string()))
}

/// GET /api/v1/market/skills?top_n=
pub async fn handle_skill_demand(
    State(state): State<AppState>,
    Query(query): Query<SkillDemandQuery>,
) -> Json<SkillDemand> {
    let top_n = query
        .top_n
        .unwrap_or(DEFAULT_TOP_SKILLS)
        .clamp(1, MAX_TOP_SKILLS);
    Json(state.market.skill_demand(top_n))
}

/// GET /api/v1/market/industries
pub async fn handle_industries(State(state): State<AppState>) -> Json<IndustryTrends> {
    Json(state.market.industry_trends())
}

/// GET /api/v1/market/regions
pub async fn handle_regions(State(state): State<AppState>) -> Json<GeographicAnalysis> {
    Json(state.market.geographic_analysis())
}

/// GET /api/v1/market/titles?search=
pub async fn handle_titles(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<Json<JobTitleAnalysis>, AppError> {
    state
        .market
        .job_title_analysis(query.search.as_deref())
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No job titles match the search".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Session-scoped
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/market/skills
///
/// Skills entered on the market page replace the session's skill set.
pub async fn handle_set_market_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MarketSkillsRequest>,
) -> Result<Json<CurrentSkills>, AppError> {
    let skills = SkillSet::from_user_input(request.skills, &DEFAULT_VOCABULARY);
    if skills.is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    let session = state.session(id).await?;
    let mut session = session.lock().await;
    session.set_skills(skills, SkillSource::JobMarket);
    let current = session
        .skills()
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("skill set missing after write")))?;
    Ok(Json(current))
}

/// GET /api/v1/sessions/:id/market/matches
pub async fn handle_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchesResponse>, AppError> {
    let session = state.session(id).await?;
    let skills = session.lock().await.skill_set();

    let matches = state.market.filter_by_skills(&skills);
    Ok(Json(MatchesResponse {
        total_matches: matches.len(),
        jobs: matches
            .into_iter()
            .take(MAX_LISTED_MATCHES)
            .cloned()
            .collect(),
        skills,
    }))
}

/// GET /api/v1/sessions/:id/market/certifications
pub async fn handle_certifications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CertificationsResponse>, AppError> {
    let session = state.session(id).await?;
    let skills = session.lock().await.skill_set();

    Ok(Json(CertificationsResponse {
        recommendations: certification_recommendations(&skills),
        skills,
    }))
}

/// POST /api/v1/sessions/:id/market/trends
pub async fn handle_market_trends(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TrendsRequest>,
) -> Result<Json<AnalysisEnvelope<MarketTrends>>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let envelope = analyze_market_trends(state.llm.as_ref(), &request.query)
        .await
        .into_envelope();
    session
        .store_analysis(AnalysisKind::MarketTrends, &envelope)
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(envelope))
}
