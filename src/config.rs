use std::path::PathBuf;

use chrono::NaiveDate;

use crate::dashboard::Dashboard;
use crate::data::filter::FilterCriteria;
use crate::data::model::SalaryRange;
use crate::error::ConfigError;

pub const DEFAULT_DATASET: &str = "future_jobs_dataset.csv";

pub const ENV_DATASET: &str = "JOBS_DATASET";
pub const ENV_TITLE: &str = "JOBS_TITLE";
pub const ENV_LOCATION: &str = "JOBS_LOCATION";
pub const ENV_DATE_FROM: &str = "JOBS_DATE_FROM";
pub const ENV_DATE_TO: &str = "JOBS_DATE_TO";
pub const ENV_SALARY_MIN_K: &str = "JOBS_SALARY_MIN_K";
pub const ENV_SALARY_MAX_K: &str = "JOBS_SALARY_MAX_K";
pub const ENV_OUTPUT: &str = "JOBS_OUTPUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Run settings, read from `JOBS_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dataset_path: PathBuf,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub salary_min_k: Option<i64>,
    pub salary_max_k: Option<i64>,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            job_title: None,
            location: None,
            date_from: None,
            date_to: None,
            salary_min_k: None,
            salary_max_k: None,
            output: OutputFormat::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let output = match get(ENV_OUTPUT) {
            None => OutputFormat::default(),
            Some(v) => {
                let format = v.trim().to_ascii_lowercase();
                match format.as_str() {
                    "json" => OutputFormat::Json,
                    "text" => OutputFormat::Text,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            var: ENV_OUTPUT,
                            value: v,
                            reason: "expected 'json' or 'text'",
                        })
                    }
                }
            }
        };

        Ok(Settings {
            dataset_path: get(ENV_DATASET)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET)),
            job_title: get(ENV_TITLE),
            location: get(ENV_LOCATION),
            date_from: get(ENV_DATE_FROM).map(|v| parse_date(ENV_DATE_FROM, v)).transpose()?,
            date_to: get(ENV_DATE_TO).map(|v| parse_date(ENV_DATE_TO, v)).transpose()?,
            salary_min_k: get(ENV_SALARY_MIN_K)
                .map(|v| parse_thousands(ENV_SALARY_MIN_K, v))
                .transpose()?,
            salary_max_k: get(ENV_SALARY_MAX_K)
                .map(|v| parse_thousands(ENV_SALARY_MAX_K, v))
                .transpose()?,
            output,
        })
    }

    /// Translate the settings into criteria for `dashboard`.
    ///
    /// The date filter needs both endpoints. A missing salary bound falls back
    /// to the observed bound.
    pub fn criteria_for(&self, dashboard: &Dashboard) -> FilterCriteria {
        let mut criteria = dashboard.default_criteria();
        if let Some(title) = &self.job_title {
            criteria = criteria.with_job_title(title.clone());
        }
        if let Some(location) = &self.location {
            criteria = criteria.with_location(location.clone());
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            criteria = criteria.with_date_range(from, to);
        }
        if self.salary_min_k.is_some() || self.salary_max_k.is_some() {
            let observed = criteria.salary_range;
            let min = self.salary_min_k.map_or(observed.min, |k| k as f64 * 1000.0);
            let max = self.salary_max_k.map_or(observed.max, |k| k as f64 * 1000.0);
            criteria = criteria.with_salary_range(SalaryRange::new(min, max));
        }
        criteria
    }
}

fn parse_date(var: &'static str, value: String) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ConfigError::InvalidValue {
        var,
        value,
        reason: "expected YYYY-MM-DD",
    })
}

fn parse_thousands(var: &'static str, value: String) -> Result<i64, ConfigError> {
    value.trim().parse::<i64>().map_err(|_| ConfigError::InvalidValue {
        var,
        value,
        reason: "expected a whole number of thousands",
    })
}
