//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use future_jobs_explorer::data::loader::load_file;
use future_jobs_explorer::{JobDataset, JobPosting};

/// Load a fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> JobDataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test_data")
        .join(name);
    load_fixture_path(&path)
}

fn load_fixture_path(path: &Path) -> JobDataset {
    load_file(path).unwrap_or_else(|e| panic!("Failed to load test data {}: {}", path.display(), e))
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn posting(
    id: &str,
    title: &str,
    salary: Option<f64>,
    date: Option<NaiveDate>,
    remote: &str,
) -> JobPosting {
    JobPosting {
        job_id: id.to_string(),
        title: Some(title.to_string()),
        industry: Some("Technology".to_string()),
        location: Some("Berlin".to_string()),
        posting_date: date,
        salary_usd: salary,
        skills_required: None,
        remote_option: Some(remote.to_string()),
    }
}

/// The three-row dataset used by the headline scenarios.
pub fn scenario_dataset() -> JobDataset {
    JobDataset::from_postings(vec![
        posting("1", "Engineer", Some(100_000.0), Some(ymd(2024, 1, 15)), "Yes"),
        posting("2", "Engineer", Some(120_000.0), Some(ymd(2024, 2, 10)), "No"),
        posting("3", "Analyst", Some(80_000.0), None, "yes"),
    ])
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
