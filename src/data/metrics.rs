use serde::Serialize;

use super::aggregate::{count_by, MonthCount};
use super::filter::FilteredView;
use super::model::YearMonth;

/// Headline numbers shown above the tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub total_jobs: usize,
    /// `None` when no posting in the view has a known salary.
    pub average_salary: Option<f64>,
    /// Most frequent title; `None` for an empty view.
    pub fastest_growing_role: Option<String>,
    pub remote_count: usize,
    /// Share of remote postings in percent; 0 for an empty view.
    pub remote_percentage: f64,
    /// First-to-last month change of the monthly trend, in percent.
    pub growth_percentage: f64,
    pub latest_month: Option<LatestMonth>,
}

/// Newest bucket of the monthly trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestMonth {
    pub month: YearMonth,
    /// e.g. "February 2024"
    pub label: String,
    pub count: usize,
}

/// Compute every metric for `view`; `trend` is the view's monthly trend.
pub fn compute(view: &FilteredView, trend: &[MonthCount]) -> DerivedMetrics {
    let (remote_count, remote_percentage) = remote_share(view);
    DerivedMetrics {
        total_jobs: view.len(),
        average_salary: average_salary(view),
        fastest_growing_role: fastest_growing_role(view),
        remote_count,
        remote_percentage,
        growth_percentage: growth_percentage(trend),
        latest_month: latest_month(trend),
    }
}

/// Mean of the known salaries.
pub fn average_salary(view: &FilteredView) -> Option<f64> {
    let (sum, n) = view
        .iter()
        .filter_map(|p| p.salary_usd)
        .fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Mode of the title column; ties go to the title seen first.
pub fn fastest_growing_role(view: &FilteredView) -> Option<String> {
    count_by(view.iter().filter_map(|p| p.title.as_deref()))
        .into_iter()
        .next()
        .map(|e| e.key)
}

/// Remote postings as (count, percentage of all postings).
pub fn remote_share(view: &FilteredView) -> (usize, f64) {
    let remote = view.iter().filter(|p| p.is_remote()).count();
    if view.is_empty() {
        return (0, 0.0);
    }
    (remote, remote as f64 / view.len() as f64 * 100.0)
}

/// `(last - first) / first * 100` over the trend endpoints.
///
/// 0 when the trend has fewer than two months or starts at zero. This is an
/// endpoint comparison, not a fitted slope.
pub fn growth_percentage(trend: &[MonthCount]) -> f64 {
    match (trend.first(), trend.last()) {
        (Some(first), Some(last)) if trend.len() > 1 && first.count > 0 => {
            (last.count as f64 - first.count as f64) / first.count as f64 * 100.0
        }
        _ => 0.0,
    }
}

pub fn latest_month(trend: &[MonthCount]) -> Option<LatestMonth> {
    trend.last().map(|m| LatestMonth {
        month: m.month,
        label: m.month.label(),
        count: m.count,
    })
}
