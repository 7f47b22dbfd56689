use chrono::NaiveDate;
use serde::Serialize;

use super::model::{DateRange, JobDataset, JobPosting, SalaryRange};

// ---------------------------------------------------------------------------
// Filter criteria: one instance per user interaction
// ---------------------------------------------------------------------------

/// The user's current selections.
///
/// Unset optional criteria pass every row. The salary range is always active
/// and starts out as the observed range of the base dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub date_range: Option<DateRange>,
    pub salary_range: SalaryRange,
}

impl FilterCriteria {
    /// No selections; salary range spans the whole dataset.
    pub fn for_dataset(dataset: &JobDataset) -> Self {
        FilterCriteria {
            job_title: None,
            location: None,
            date_range: None,
            salary_range: dataset.default_salary_range(),
        }
    }

    pub fn with_job_title(mut self, title: impl Into<String>) -> Self {
        self.job_title = Some(title.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_date_range(mut self, a: NaiveDate, b: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(a, b));
        self
    }

    pub fn with_salary_range(mut self, range: SalaryRange) -> Self {
        self.salary_range = range;
        self
    }
}

/// Key used for title/location comparison: trimmed and lower-cased.
fn match_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// A blank selection behaves like no selection.
fn active_key(selection: &Option<String>) -> Option<String> {
    selection
        .as_deref()
        .map(match_key)
        .filter(|k| !k.is_empty())
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Postings that satisfy every active criterion, in base-dataset order.
///
/// Owns its rows; the base dataset is never touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilteredView {
    postings: Vec<JobPosting>,
}

impl FilteredView {
    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobPosting> {
        self.postings.iter()
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl From<Vec<JobPosting>> for FilteredView {
    fn from(postings: Vec<JobPosting>) -> Self {
        FilteredView { postings }
    }
}

impl<'a> IntoIterator for &'a FilteredView {
    type Item = &'a JobPosting;
    type IntoIter = std::slice::Iter<'a, JobPosting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Return the postings that pass all criteria (logical AND).
///
/// A posting passes:
/// * the salary range when its salary is known and inside the range
/// * the date range (if set) when its date is known and inside the range
/// * the location / title (if set) when the trimmed, lower-cased values are equal
///
/// Nulls never pass an active bound.
pub fn apply(dataset: &JobDataset, criteria: &FilterCriteria) -> FilteredView {
    let title = active_key(&criteria.job_title);
    let location = active_key(&criteria.location);
    let salary = criteria.salary_range;
    let dates = criteria.date_range;

    let matches_text = |value: &Option<String>, wanted: &Option<String>| match wanted {
        None => true,
        Some(w) => value.as_deref().is_some_and(|v| match_key(v) == *w),
    };

    dataset
        .postings
        .iter()
        .filter(|p| p.salary_usd.is_some_and(|s| salary.contains(s)))
        .filter(|p| match dates {
            None => true,
            Some(r) => p.posting_date.is_some_and(|d| r.contains(d)),
        })
        .filter(|p| matches_text(&p.location, &location))
        .filter(|p| matches_text(&p.title, &title))
        .cloned()
        .collect::<Vec<_>>()
        .into()
}
