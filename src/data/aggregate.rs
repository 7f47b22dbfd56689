use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::FilteredView;
use super::model::YearMonth;

/// Length of every ranked table.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

/// Number of postings sharing a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub key: String,
    pub count: usize,
}

/// Mean salary of the postings sharing a key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanEntry {
    pub key: String,
    pub mean: f64,
}

/// Postings in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: YearMonth,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

/// Count occurrences of each key, sorted by count descending.
///
/// Ties keep first-encountered order (stable sort over insertion order).
pub fn count_by<'a, I>(keys: I) -> Vec<CountEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut entries: Vec<CountEntry> = Vec::new();

    for key in keys {
        match slots.get(key) {
            Some(&i) => entries[i].count += 1,
            None => {
                slots.insert(key, entries.len());
                entries.push(CountEntry {
                    key: key.to_string(),
                    count: 1,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

fn top(mut entries: Vec<CountEntry>) -> Vec<CountEntry> {
    entries.truncate(TOP_N);
    entries
}

// ---------------------------------------------------------------------------
// The five views
// ---------------------------------------------------------------------------

/// Most frequent job titles.
pub fn role_demand(view: &FilteredView) -> Vec<CountEntry> {
    top(count_by(view.iter().filter_map(|p| p.title.as_deref())))
}

/// Most frequently required skills across all postings.
pub fn skill_demand(view: &FilteredView) -> Vec<CountEntry> {
    top(count_by(view.iter().flat_map(|p| p.skills())))
}

/// Industries with the most postings.
pub fn industry_demand(view: &FilteredView) -> Vec<CountEntry> {
    top(count_by(view.iter().filter_map(|p| p.industry.as_deref())))
}

/// Postings per month, oldest first. Rows without a date are skipped.
pub fn monthly_trend(view: &FilteredView) -> Vec<MonthCount> {
    let mut months: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for date in view.iter().filter_map(|p| p.posting_date) {
        *months.entry(YearMonth::of(date)).or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Locations ranked by mean salary. Null salaries do not enter the mean and
/// locations with no known salary are dropped.
pub fn location_salary(view: &FilteredView) -> Vec<MeanEntry> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();

    for p in view {
        let (Some(location), Some(salary)) = (p.location.as_deref(), p.salary_usd) else {
            continue;
        };
        match slots.get(location) {
            Some(&i) => {
                sums[i].1 += salary;
                sums[i].2 += 1;
            }
            None => {
                slots.insert(location, sums.len());
                sums.push((location, salary, 1));
            }
        }
    }

    let mut entries: Vec<MeanEntry> = sums
        .into_iter()
        .map(|(key, total, n)| MeanEntry {
            key: key.to_string(),
            mean: total / n as f64,
        })
        .collect();
    entries.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    entries.truncate(TOP_N);
    entries
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::JobPosting;

    fn posting(title: &str, location: &str, salary: Option<f64>, date: Option<&str>, skills: Option<&str>) -> JobPosting {
        JobPosting {
            job_id: format!("{title}-{location}"),
            title: Some(title.to_string()),
            industry: Some(format!("{title} Industry")),
            location: Some(location.to_string()),
            posting_date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            salary_usd: salary,
            skills_required: skills.map(str::to_string),
            remote_option: None,
        }
    }

    fn keys(entries: &[CountEntry]) -> Vec<(&str, usize)> {
        entries.iter().map(|e| (e.key.as_str(), e.count)).collect()
    }

    #[test]
    fn counts_sort_descending_with_first_seen_ties() {
        let counted = count_by(["b", "a", "c", "a", "c", "d"]);
        assert_eq!(keys(&counted), vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
    }

    #[test]
    fn role_demand_is_truncated_to_top_n() {
        let mut rows = Vec::new();
        for i in 0..15 {
            for _ in 0..(i + 1) {
                rows.push(posting(&format!("Role {i:02}"), "X", Some(1.0), None, None));
            }
        }
        let ranked = role_demand(&FilteredView::from(rows));
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].key, "Role 14");
        assert_eq!(ranked[0].count, 15);
        assert_eq!(ranked[9].key, "Role 05");
    }

    #[test]
    fn skills_are_flattened_and_counted() {
        let view = FilteredView::from(vec![
            posting("A", "X", None, None, Some("Python, SQL")),
            posting("B", "X", None, None, Some("SQL ,,Rust")),
            posting("C", "X", None, None, None),
        ]);
        let ranked = skill_demand(&view);
        assert_eq!(keys(&ranked), vec![("SQL", 2), ("Python", 1), ("Rust", 1)]);

        let total: usize = ranked.iter().map(|e| e.count).sum();
        let rows_with_skills = view.iter().filter(|p| p.skills_required.is_some()).count();
        assert!(total >= rows_with_skills);
    }

    #[test]
    fn industry_demand_counts_rows() {
        let view = FilteredView::from(vec![
            posting("A", "X", None, None, None),
            posting("B", "X", None, None, None),
            posting("B", "Y", None, None, None),
        ]);
        assert_eq!(
            keys(&industry_demand(&view)),
            vec![("B Industry", 2), ("A Industry", 1)]
        );
    }

    #[test]
    fn monthly_trend_is_chronological_and_skips_null_dates() {
        let view = FilteredView::from(vec![
            posting("A", "X", None, Some("2024-03-02"), None),
            posting("A", "X", None, Some("2023-12-31"), None),
            posting("A", "X", None, Some("2024-03-30"), None),
            posting("A", "X", None, None, None),
        ]);
        let trend = monthly_trend(&view);
        let months: Vec<(String, usize)> =
            trend.iter().map(|m| (m.month.to_string(), m.count)).collect();
        assert_eq!(
            months,
            vec![("2023-12".to_string(), 1), ("2024-03".to_string(), 2)]
        );
    }

    #[test]
    fn location_salary_ignores_nulls_and_drops_empty_groups() {
        let view = FilteredView::from(vec![
            posting("A", "Berlin", Some(100_000.0), None, None),
            posting("A", "Berlin", None, None, None),
            posting("A", "Berlin", Some(50_000.0), None, None),
            posting("A", "Paris", Some(90_000.0), None, None),
            posting("A", "Oslo", None, None, None),
        ]);
        let ranked = location_salary(&view);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, "Paris");
        assert_eq!(ranked[1].key, "Berlin");
        assert!((ranked[1].mean - 75_000.0).abs() < 1e-9);
    }

    #[test]
    fn empty_view_yields_empty_tables() {
        let view = FilteredView::default();
        assert!(role_demand(&view).is_empty());
        assert!(skill_demand(&view).is_empty());
        assert!(industry_demand(&view).is_empty());
        assert!(monthly_trend(&view).is_empty());
        assert!(location_salary(&view).is_empty());
    }
}
