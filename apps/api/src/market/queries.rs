use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dataset::{JobMarketDataset, JobMarketRecord};
use crate::models::profile::ExperienceLevel;
use crate::skills::SkillSet;

const TOP_INDUSTRIES_BY_SALARY: usize = 10;
const TOP_INDUSTRIES_BY_COUNT: usize = 15;
const TOP_COUNTRIES: usize = 15;
const TOP_TITLES: usize = 20;
const TOP_TITLE_SKILLS: usize = 15;
const TOP_SKILLS_PER_GROUP: usize = 10;
const TOP_INDUSTRIES_PER_COUNTRY: usize = 5;
const BREAKDOWN_GROUPS: usize = 10;

const MIN_INDUSTRY_POSTINGS: usize = 10;
const MIN_COUNTRY_POSTINGS: usize = 5;
const MIN_TITLE_POSTINGS: usize = 3;

pub const DEFAULT_TOP_SKILLS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedAverage {
    pub name: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; absent with fewer than two postings.
    pub std_dev: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalaryFilter {
    pub experience_level: Option<ExperienceLevel>,
    /// Case-insensitive substring of the industry name.
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelSalary {
    pub experience_level: ExperienceLevel,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalaryAnalysis {
    pub stats: SalaryStats,
    pub by_experience: Vec<LevelSalary>,
    pub by_industry: Vec<NamedAverage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSkills {
    pub group: String,
    pub skills: Vec<NamedCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillDemand {
    pub top_skills: Vec<NamedCount>,
    pub by_experience: Vec<GroupSkills>,
    pub by_industry: Vec<GroupSkills>,
    pub total_unique_skills: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupBreakdown {
    pub group: String,
    pub counts: Vec<NamedCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndustryTrends {
    pub job_counts: Vec<NamedCount>,
    pub salary_ranking: Vec<NamedAverage>,
    pub remote_trends: Vec<NamedAverage>,
    pub experience_distribution: Vec<GroupBreakdown>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeographicAnalysis {
    pub job_counts: Vec<NamedCount>,
    pub salary_ranking: Vec<NamedAverage>,
    pub remote_trends: Vec<NamedAverage>,
    pub top_industries_by_country: Vec<GroupBreakdown>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleSalary {
    pub job_title: String,
    pub mean: f64,
    pub count: usize,
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTitleAnalysis {
    pub job_counts: Vec<NamedCount>,
    pub salary_analysis: Vec<TitleSalary>,
    pub experience_distribution: Vec<NamedCount>,
    pub top_skills: Vec<NamedCount>,
    pub total_jobs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryInsights {
    pub total_jobs: usize,
    pub average_salary: f64,
    pub top_industry: String,
    pub top_country: String,
    pub top_skill: Option<String>,
    /// Share of postings with any remote component, in percent.
    pub remote_percentage: f64,
    pub experience_distribution: Vec<NamedCount>,
    pub earliest_posting: Option<NaiveDate>,
    pub latest_posting: Option<NaiveDate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation helpers
// ────────────────────────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

pub(crate) fn salary_stats(values: &[f64]) -> Option<SalaryStats> {
    if values.is_empty() {
        return None;
    }
    Some(SalaryStats {
        mean: mean(values),
        median: median(values),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        std_dev: sample_std_dev(values),
        count: values.len(),
    })
}

/// Counts occurrences, highest first; ties by name ascending.
pub(crate) fn ranked_counts<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<NamedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }
    let mut ranked: Vec<NamedCount> = counts
        .into_iter()
        .map(|(name, count)| NamedCount {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// Groups values by key and ranks the groups by mean, highest first; ties by name.
fn ranked_means<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Vec<NamedAverage> {
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for (name, value) in pairs {
        groups.entry(name).or_default().push(value);
    }
    let mut ranked: Vec<NamedAverage> = groups
        .into_iter()
        .map(|(name, values)| NamedAverage {
            name: name.to_string(),
            mean: mean(&values),
            count: values.len(),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.mean
            .total_cmp(&a.mean)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}

fn skill_counts<'a>(records: impl IntoIterator<Item = &'a JobMarketRecord>) -> Vec<NamedCount> {
    ranked_counts(records.into_iter().flat_map(|r| r.skills.iter()))
}

fn level_counts<'a>(records: impl IntoIterator<Item = &'a JobMarketRecord>) -> Vec<NamedCount> {
    ranked_counts(
        records
            .into_iter()
            .filter_map(|r| r.experience_level.map(|l| l.as_str())),
    )
}

fn top(mut items: Vec<NamedCount>, n: usize) -> Vec<NamedCount> {
    items.truncate(n);
    items
}

// ────────────────────────────────────────────────────────────────────────────
// Queries
// ────────────────────────────────────────────────────────────────────────────

impl JobMarketDataset {
    /// Postings whose required skills intersect `skills` (case-insensitive, canonical labels).
    pub fn filter_by_skills(&self, skills: &SkillSet) -> Vec<&JobMarketRecord> {
        if skills.is_empty() {
            return Vec::new();
        }
        self.records()
            .iter()
            .filter(|record| skills.normalized().any(|s| record.skills.contains(s)))
            .collect()
    }

    /// Salary statistics under an optional level/industry filter. `None` when nothing matches.
    pub fn salary_analysis(&self, filter: &SalaryFilter) -> Option<SalaryAnalysis> {
        let industry = filter
            .industry
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let rows: Vec<&JobMarketRecord> = self
            .records()
            .iter()
            .filter(|r| {
                filter
                    .experience_level
                    .map_or(true, |level| r.experience_level == Some(level))
            })
            .filter(|r| {
                industry
                    .as_deref()
                    .map_or(true, |needle| r.industry.to_lowercase().contains(needle))
            })
            .collect();

        let salaries: Vec<f64> = rows.iter().map(|r| r.salary_usd).collect();
        let stats = salary_stats(&salaries)?;

        let by_experience = ExperienceLevel::ALL
            .iter()
            .filter_map(|level| {
                let values: Vec<f64> = rows
                    .iter()
                    .filter(|r| r.experience_level == Some(*level))
                    .map(|r| r.salary_usd)
                    .collect();
                (!values.is_empty()).then(|| LevelSalary {
                    experience_level: *level,
                    mean: mean(&values),
                    count: values.len(),
                })
            })
            .collect();

        let mut by_industry = ranked_means(rows.iter().map(|r| (r.industry.as_str(), r.salary_usd)));
        by_industry.truncate(TOP_INDUSTRIES_BY_SALARY);

        Some(SalaryAnalysis {
            stats,
            by_experience,
            by_industry,
        })
    }

    pub fn skill_demand(&self, top_n: usize) -> SkillDemand {
        let all = skill_counts(self.records());
        let total_unique_skills = all.len();

        let by_experience = ExperienceLevel::ALL
            .iter()
            .filter_map(|level| {
                let skills = skill_counts(
                    self.records()
                        .iter()
                        .filter(|r| r.experience_level == Some(*level)),
                );
                (!skills.is_empty()).then(|| GroupSkills {
                    group: level.to_string(),
                    skills: top(skills, TOP_SKILLS_PER_GROUP),
                })
            })
            .collect();

        let industries = top(
            ranked_counts(self.records().iter().map(|r| r.industry.as_str())),
            BREAKDOWN_GROUPS,
        );
        let by_industry = industries
            .into_iter()
            .map(|industry| GroupSkills {
                skills: top(
                    skill_counts(self.records().iter().filter(|r| r.industry == industry.name)),
                    TOP_SKILLS_PER_GROUP,
                ),
                group: industry.name,
            })
            .collect();

        SkillDemand {
            top_skills: top(all, top_n),
            by_experience,
            by_industry,
            total_unique_skills,
        }
    }

    pub fn industry_trends(&self) -> IndustryTrends {
        let records = self.records();
        let job_counts = ranked_counts(records.iter().map(|r| r.industry.as_str()));

        let salary_ranking = ranked_means(records.iter().map(|r| (r.industry.as_str(), r.salary_usd)))
            .into_iter()
            .filter(|g| g.count >= MIN_INDUSTRY_POSTINGS)
            .collect();

        let remote_trends = ranked_means(
            records
                .iter()
                .filter_map(|r| r.remote_ratio.map(|ratio| (r.industry.as_str(), ratio))),
        );

        let experience_distribution = job_counts
            .iter()
            .map(|industry| GroupBreakdown {
                group: industry.name.clone(),
                counts: level_counts(records.iter().filter(|r| r.industry == industry.name)),
            })
            .collect();

        IndustryTrends {
            job_counts: top(job_counts, TOP_INDUSTRIES_BY_COUNT),
            salary_ranking,
            remote_trends,
            experience_distribution,
        }
    }

    pub fn geographic_analysis(&self) -> GeographicAnalysis {
        let records = self.records();
        let job_counts = ranked_counts(records.iter().map(|r| r.region.as_str()));

        let salary_ranking = ranked_means(records.iter().map(|r| (r.region.as_str(), r.salary_usd)))
            .into_iter()
            .filter(|g| g.count >= MIN_COUNTRY_POSTINGS)
            .collect();

        let remote_trends = ranked_means(
            records
                .iter()
                .filter_map(|r| r.remote_ratio.map(|ratio| (r.region.as_str(), ratio))),
        );

        let top_industries_by_country = job_counts
            .iter()
            .take(BREAKDOWN_GROUPS)
            .map(|country| GroupBreakdown {
                group: country.name.clone(),
                counts: top(
                    ranked_counts(
                        records
                            .iter()
                            .filter(|r| r.region == country.name)
                            .map(|r| r.industry.as_str()),
                    ),
                    TOP_INDUSTRIES_PER_COUNTRY,
                ),
            })
            .collect();

        GeographicAnalysis {
            job_counts: top(job_counts, TOP_COUNTRIES),
            salary_ranking,
            remote_trends,
            top_industries_by_country,
        }
    }

    /// Title breakdown, optionally narrowed by a case-insensitive title substring.
    /// `None` when the search matches nothing.
    pub fn job_title_analysis(&self, search: Option<&str>) -> Option<JobTitleAnalysis> {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let rows: Vec<&JobMarketRecord> = self
            .records()
            .iter()
            .filter(|r| {
                needle
                    .as_deref()
                    .map_or(true, |n| r.job_title.to_lowercase().contains(n))
            })
            .collect();
        if rows.is_empty() {
            return None;
        }

        let mut by_title: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for r in &rows {
            by_title.entry(r.job_title.as_str()).or_default().push(r.salary_usd);
        }
        let mut salary_analysis: Vec<TitleSalary> = by_title
            .into_iter()
            .filter(|(_, values)| values.len() >= MIN_TITLE_POSTINGS)
            .map(|(title, values)| TitleSalary {
                job_title: title.to_string(),
                mean: mean(&values),
                count: values.len(),
                std_dev: sample_std_dev(&values),
            })
            .collect();
        salary_analysis.sort_by(|a, b| {
            b.mean
                .total_cmp(&a.mean)
                .then_with(|| a.job_title.cmp(&b.job_title))
        });

        Some(JobTitleAnalysis {
            job_counts: top(
                ranked_counts(rows.iter().map(|r| r.job_title.as_str())),
                TOP_TITLES,
            ),
            salary_analysis,
            experience_distribution: level_counts(rows.iter().copied()),
            top_skills: top(skill_counts(rows.iter().copied()), TOP_TITLE_SKILLS),
            total_jobs: rows.len(),
        })
    }

    /// Headline numbers for the overview page. `None` for an empty dataset.
    pub fn summary_insights(&self) -> Option<SummaryInsights> {
        let records = self.records();
        if records.is_empty() {
            return None;
        }
        let salaries: Vec<f64> = records.iter().map(|r| r.salary_usd).collect();
        let first_name = |counts: Vec<NamedCount>| counts.into_iter().next().map(|c| c.name);

        let remote = records
            .iter()
            .filter(|r| r.remote_ratio.is_some_and(|ratio| ratio > 0.0))
            .count();

        Some(SummaryInsights {
            total_jobs: records.len(),
            average_salary: mean(&salaries),
            top_industry: first_name(ranked_counts(records.iter().map(|r| r.industry.as_str())))
                .unwrap_or_default(),
            top_country: first_name(ranked_counts(records.iter().map(|r| r.region.as_str())))
                .unwrap_or_default(),
            top_skill: first_name(skill_counts(records)),
            remote_percentage: remote as f64 / records.len() as f64 * 100.0,
            experience_distribution: level_counts(records),
            earliest_posting: records.iter().filter_map(|r| r.posting_date).min(),
            latest_posting: records.iter().filter_map(|r| r.posting_date).max(),
        })
    }
}
