use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::MarketError;
use crate::models::profile::ExperienceLevel;
use crate::skills::{SkillSet, DEFAULT_VOCABULARY};

pub const MIN_SALARY_USD: f64 = 10_000.0;
pub const MAX_SALARY_USD: f64 = 500_000.0;

/// One CSV row as written by the dataset exporter. Every column is optional at this stage;
/// `JobMarketRecord::from_row` decides what is usable.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJobRow {
    job_title: Option<String>,
    salary_usd: Option<String>,
    salary_currency: Option<String>,
    experience_level: Option<String>,
    company_location: Option<String>,
    remote_ratio: Option<String>,
    required_skills: Option<String>,
    industry: Option<String>,
    posting_date: Option<String>,
}

/// One immutable job posting.
#[derive(Debug, Clone, Serialize)]
pub struct JobMarketRecord {
    pub job_title: String,
    pub salary_usd: f64,
    pub salary_currency: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    /// Company location, used as the region.
    pub region: String,
    /// 0 = on-site, 50 = hybrid, 100 = fully remote.
    pub remote_ratio: Option<f64>,
    /// Required skills, canonicalised against the skill vocabulary.
    pub skills: SkillSet,
    pub industry: String,
    pub posting_date: Option<NaiveDate>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

impl JobMarketRecord {
    /// Applies the preprocessing rules. `None` means the row is dropped.
    fn from_row(row: RawJobRow) -> Option<Self> {
        let job_title = non_blank(row.job_title)?;
        let industry = non_blank(row.industry)?;
        let salary_usd = parse_number(row.salary_usd.as_deref())?;
        if !(MIN_SALARY_USD..=MAX_SALARY_USD).contains(&salary_usd) {
            return None;
        }

        let skills = SkillSet::from_user_input(
            row.required_skills
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
            &DEFAULT_VOCABULARY,
        );

        Some(Self {
            job_title,
            salary_usd,
            salary_currency: non_blank(row.salary_currency),
            experience_level: row
                .experience_level
                .as_deref()
                .and_then(|level| level.parse().ok()),
            region: non_blank(row.company_location).unwrap_or_else(|| "Unknown".to_string()),
            remote_ratio: parse_number(row.remote_ratio.as_deref()),
            skills,
            industry,
            posting_date: row
                .posting_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
        })
    }
}

/// The in-memory job market table. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct JobMarketDataset {
    records: Vec<JobMarketRecord>,
}

impl JobMarketDataset {
    pub fn from_records(records: Vec<JobMarketRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[JobMarketRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parses CSV with a header row. Rows that fail to decode or fail preprocessing are
    /// skipped; only a broken header is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MarketError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        reader.headers()?;

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for result in reader.deserialize::<RawJobRow>() {
            match result.ok().and_then(JobMarketRecord::from_row) {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }

        debug!("Parsed {} job records ({} dropped)", records.len(), dropped);
        Ok(Self { records })
    }

    /// Loads every `*.csv` file in `dir` in name order. A missing directory yields an empty
    /// dataset so the rest of the service stays usable.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, MarketError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            warn!("Dataset directory {} not found; job market data is empty", dir.display());
            return Ok(Self::default());
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|source| MarketError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();
        files.sort();

        let mut records = Vec::new();
        for path in &files {
            let file = File::open(path).map_err(|source| MarketError::Io {
                path: path.clone(),
                source,
            })?;
            let part = Self::from_reader(file)?;
            info!("Loaded {} job records from {}", part.len(), path.display());
            records.extend(part.records);
        }

        info!(
            "Job market dataset ready: {} records from {} file(s)",
            records.len(),
            files.len()
        );
        Ok(Self { records })
    }
}
