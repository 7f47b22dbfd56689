use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Canonical column labels, as produced by `normalize::canonical_label`.
pub mod columns {
    pub const JOB_ID: &str = "Job_Id";
    pub const JOB_TITLE: &str = "Job_Title";
    pub const INDUSTRY: &str = "Industry";
    pub const LOCATION: &str = "Location";
    pub const POSTING_DATE: &str = "Posting_Date";
    pub const SALARY_USD: &str = "Salary_Usd";
    pub const SKILLS_REQUIRED: &str = "Skills_Required";
    pub const REMOTE_OPTION: &str = "Remote_Option";

    pub const REQUIRED: [&str; 8] = [
        JOB_ID,
        JOB_TITLE,
        INDUSTRY,
        LOCATION,
        POSTING_DATE,
        SALARY_USD,
        SKILLS_REQUIRED,
        REMOTE_OPTION,
    ];
}

/// Separator inside the `Skills_Required` cell.
pub const SKILL_DELIMITER: char = ',';

// ---------------------------------------------------------------------------
// JobPosting – one row of the base dataset
// ---------------------------------------------------------------------------

/// A single normalized job posting.
///
/// Text fields are `None` when the source cell was empty. `posting_date` and
/// `salary_usd` are `None` when the cell was empty or could not be coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPosting {
    /// Row identity only; never grouped or filtered on.
    pub job_id: String,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub posting_date: Option<NaiveDate>,
    pub salary_usd: Option<f64>,
    pub skills_required: Option<String>,
    pub remote_option: Option<String>,
}

impl JobPosting {
    /// Trimmed, non-empty skill tokens of this posting.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills_required
            .as_deref()
            .unwrap_or("")
            .split(SKILL_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether the remote indicator reads "yes", ignoring case.
    pub fn is_remote(&self) -> bool {
        self.remote_option
            .as_deref()
            .is_some_and(|r| r.to_lowercase() == "yes")
    }
}

// ---------------------------------------------------------------------------
// YearMonth – bucket key of the monthly trend
// ---------------------------------------------------------------------------

/// Calendar month of a given year. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Long label such as "February 2024".
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(d) => d.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Inclusive salary interval in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    /// Matches every non-null salary.
    pub const UNBOUNDED: SalaryRange = SalaryRange {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            SalaryRange { min: a, max: b }
        } else {
            SalaryRange { min: b, max: a }
        }
    }

    /// Build from slider positions expressed in thousands of USD.
    pub fn from_thousands(lo_k: i64, hi_k: i64) -> Self {
        SalaryRange::new(lo_k as f64 * 1000.0, hi_k as f64 * 1000.0)
    }

    pub fn contains(&self, salary: f64) -> bool {
        salary >= self.min && salary <= self.max
    }
}

/// Inclusive posting-date interval. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Endpoints given in either order are sorted.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        DateRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

// ---------------------------------------------------------------------------
// JobDataset – the immutable base dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with pre-computed selector options and bounds.
#[derive(Debug, Clone)]
pub struct JobDataset {
    pub postings: Vec<JobPosting>,
    /// Sorted distinct job titles (title picker options).
    pub job_titles: Vec<String>,
    /// Sorted distinct locations (location picker options).
    pub locations: Vec<String>,
    /// Earliest and latest non-null posting date.
    pub date_bounds: Option<DateRange>,
    /// Lowest and highest non-null salary.
    pub salary_bounds: Option<SalaryRange>,
}

impl JobDataset {
    /// Build option lists and bounds from the loaded postings.
    pub fn from_postings(postings: Vec<JobPosting>) -> Self {
        let mut titles: BTreeSet<String> = BTreeSet::new();
        let mut locations: BTreeSet<String> = BTreeSet::new();
        let mut date_bounds: Option<DateRange> = None;
        let mut salary_bounds: Option<SalaryRange> = None;

        // A blank option could never be selected: blank criteria are unset.
        let option = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };

        for p in &postings {
            if let Some(t) = option(&p.title) {
                titles.insert(t);
            }
            if let Some(l) = option(&p.location) {
                locations.insert(l);
            }
            if let Some(d) = p.posting_date {
                date_bounds = Some(match date_bounds {
                    Some(r) => DateRange::new(r.start.min(d), r.end.max(d)),
                    None => DateRange::new(d, d),
                });
            }
            if let Some(s) = p.salary_usd {
                salary_bounds = Some(match salary_bounds {
                    Some(r) => SalaryRange::new(r.min.min(s), r.max.max(s)),
                    None => SalaryRange::new(s, s),
                });
            }
        }

        JobDataset {
            postings,
            job_titles: titles.into_iter().collect(),
            locations: locations.into_iter().collect(),
            date_bounds,
            salary_bounds,
        }
    }

    /// Salary range selected when the user has not touched the slider.
    pub fn default_salary_range(&self) -> SalaryRange {
        self.salary_bounds.unwrap_or(SalaryRange::UNBOUNDED)
    }

    /// Whole-thousand slider bounds that still enclose every observed salary.
    pub fn salary_slider_bounds(&self) -> Option<(i64, i64)> {
        self.salary_bounds.map(|r| {
            (
                (r.min / 1000.0).floor() as i64,
                (r.max / 1000.0).ceil() as i64,
            )
        })
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(id: &str, salary: Option<f64>, date: Option<NaiveDate>) -> JobPosting {
        JobPosting {
            job_id: id.to_string(),
            title: Some("Engineer".to_string()),
            industry: None,
            location: Some("Berlin".to_string()),
            posting_date: date,
            salary_usd: salary,
            skills_required: Some(" Rust, ,SQL ,".to_string()),
            remote_option: Some("YES".to_string()),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn skills_are_trimmed_and_empty_tokens_dropped() {
        let p = posting("1", None, None);
        assert_eq!(p.skills().collect::<Vec<_>>(), vec!["Rust", "SQL"]);

        let none = JobPosting {
            skills_required: None,
            ..p
        };
        assert_eq!(none.skills().count(), 0);
    }

    #[test]
    fn remote_flag_ignores_case_only() {
        let mut p = posting("1", None, None);
        assert!(p.is_remote());
        p.remote_option = Some("no".to_string());
        assert!(!p.is_remote());
        p.remote_option = None;
        assert!(!p.is_remote());
    }

    #[test]
    fn bounds_skip_nulls() {
        let ds = JobDataset::from_postings(vec![
            posting("1", Some(80_500.0), Some(ymd(2024, 3, 1))),
            posting("2", None, None),
            posting("3", Some(120_250.0), Some(ymd(2024, 1, 9))),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.salary_bounds, Some(SalaryRange::new(80_500.0, 120_250.0)));
        assert_eq!(
            ds.date_bounds,
            Some(DateRange::new(ymd(2024, 1, 9), ymd(2024, 3, 1)))
        );
        assert_eq!(ds.job_titles, vec!["Engineer".to_string()]);
    }

    #[test]
    fn blank_titles_are_not_picker_options() {
        let mut noise_only = posting("1", Some(90_000.0), None);
        noise_only.title = Some(String::new());
        let ds = JobDataset::from_postings(vec![noise_only, posting("2", Some(95_000.0), None)]);

        assert_eq!(ds.postings[0].title.as_deref(), Some(""));
        assert_eq!(ds.job_titles, vec!["Engineer".to_string()]);
    }

    #[test]
    fn slider_bounds_enclose_extremes() {
        let ds = JobDataset::from_postings(vec![
            posting("1", Some(80_500.0), None),
            posting("2", Some(120_250.0), None),
        ]);
        let (lo, hi) = ds.salary_slider_bounds().unwrap();
        assert_eq!((lo, hi), (80, 121));
        let range = SalaryRange::from_thousands(lo, hi);
        assert!(range.contains(80_500.0));
        assert!(range.contains(120_250.0));
    }

    #[test]
    fn ranges_sort_their_endpoints() {
        let r = DateRange::new(ymd(2024, 5, 1), ymd(2024, 1, 1));
        assert_eq!(r.start, ymd(2024, 1, 1));
        assert!(r.contains(ymd(2024, 5, 1)));
        assert!(SalaryRange::new(10.0, 5.0).contains(7.0));
    }

    #[test]
    fn year_month_labels() {
        let m = YearMonth::of(ymd(2024, 2, 10));
        assert_eq!(m.to_string(), "2024-02");
        assert_eq!(m.label(), "February 2024");
        assert!(m < YearMonth::of(ymd(2024, 3, 1)));
    }
}
