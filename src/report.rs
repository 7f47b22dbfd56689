use std::fmt::Write;

use crate::dashboard::DashboardView;
use crate::data::aggregate::CountEntry;

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Insert thousands separators into a non-negative integer.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole dollars with separators, e.g. `$110,000`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Dollars and cents with separators, e.g. `$110,000.00`.
pub fn format_usd_cents(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let cents = cents.abs() as u64;
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Thousands with two decimals, e.g. `$110.00k`.
pub fn format_usd_k(amount: f64) -> String {
    format!("${:.2}k", amount / 1000.0)
}

/// Signed percentage with one decimal, e.g. `+100.0%`.
pub fn format_growth(pct: f64) -> String {
    format!("{pct:+.1}%")
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// Verdict on the first-to-last month growth percentage.
pub fn growth_message(pct: f64) -> &'static str {
    if pct > 10.0 {
        "The market is growing strongly!"
    } else if pct > 0.0 {
        "Postings are stable with slight growth."
    } else {
        "The market is currently stagnant."
    }
}

/// One narrative sentence per non-empty section of the view.
pub fn insights(view: &DashboardView) -> Vec<String> {
    let m = &view.metrics;
    let mut lines = Vec::new();

    if m.total_jobs > 0 {
        let mut snapshot = format!("There are {} active postings", group_thousands(m.total_jobs as u64));
        if let Some(avg) = m.average_salary {
            let _ = write!(snapshot, " with an average salary of {}", format_usd_cents(avg));
        }
        let _ = write!(
            snapshot,
            "; {} of them ({:.1}%) can be done remotely.",
            group_thousands(m.remote_count as u64),
            m.remote_percentage
        );
        lines.push(snapshot);
    }

    if let Some(role) = view.top_roles.first() {
        lines.push(format!(
            "The role {} leads with {} postings, the strongest current demand.",
            role.key,
            group_thousands(role.count as u64)
        ));
    }
    if let Some(skill) = view.top_skills.first() {
        lines.push(format!(
            "{} is the most in-demand skill, required in {} postings.",
            skill.key,
            group_thousands(skill.count as u64)
        ));
    }
    if let Some(industry) = view.top_industries.first() {
        lines.push(format!(
            "The {} industry leads with {} postings.",
            industry.key,
            group_thousands(industry.count as u64)
        ));
    }
    if let Some(latest) = &m.latest_month {
        lines.push(format!(
            "In {}, there were {} new job postings. {}",
            latest.label,
            group_thousands(latest.count as u64),
            growth_message(m.growth_percentage)
        ));
    }
    if let Some(loc) = view.top_locations_by_salary.first() {
        lines.push(format!(
            "{} offers the highest average salary at {}.",
            loc.key,
            format_usd(loc.mean)
        ));
    }
    lines
}

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

fn count_table(out: &mut String, heading: &str, entries: &[CountEntry]) {
    let _ = writeln!(out, "\n{heading}");
    if entries.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }
    let width = entries.iter().map(|e| e.key.chars().count()).max().unwrap_or(0);
    for e in entries {
        let _ = writeln!(out, "  {:<width$}  {:>7}", e.key, group_thousands(e.count as u64));
    }
}

/// Render the whole view as plain text.
pub fn render_text(view: &DashboardView) -> String {
    let m = &view.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "Dashboard metrics");
    let _ = writeln!(out, "  Total jobs:        {}", group_thousands(m.total_jobs as u64));
    let _ = writeln!(
        out,
        "  Average salary:    {}",
        m.average_salary.map(format_usd_k).unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(
        out,
        "  Fastest growing:   {}",
        m.fastest_growing_role.as_deref().unwrap_or("n/a")
    );
    let _ = writeln!(
        out,
        "  Remote jobs:       {} ({:.1}%)",
        group_thousands(m.remote_count as u64),
        m.remote_percentage
    );

    count_table(&mut out, "Top job roles", &view.top_roles);
    count_table(&mut out, "Most in-demand skills", &view.top_skills);
    count_table(&mut out, "Top industries", &view.top_industries);

    let _ = writeln!(out, "\nMonthly postings (overall growth {})", format_growth(m.growth_percentage));
    if view.monthly_trend.is_empty() {
        let _ = writeln!(out, "  (no data)");
    }
    for point in &view.monthly_trend {
        let _ = writeln!(out, "  {}  {:>7}", point.month, group_thousands(point.count as u64));
    }

    let _ = writeln!(out, "\nAverage salary by location");
    if view.top_locations_by_salary.is_empty() {
        let _ = writeln!(out, "  (no data)");
    }
    for loc in &view.top_locations_by_salary {
        let _ = writeln!(out, "  {:<24}  {:>12}", loc.key, format_usd(loc.mean));
    }

    let lines = insights(view);
    if !lines.is_empty() {
        let _ = writeln!(out, "\nInsights");
        for line in lines {
            let _ = writeln!(out, "  - {line}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::data::loader::load_csv_str;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn currency_and_growth_formats() {
        assert_eq!(format_usd(110_000.0), "$110,000");
        assert_eq!(format_usd(99_999.6), "$100,000");
        assert_eq!(format_usd_k(110_000.0), "$110.00k");
        assert_eq!(format_usd_cents(110_000.0), "$110,000.00");
        assert_eq!(format_usd_cents(1_234.567), "$1,234.57");
        assert_eq!(format_usd_cents(0.05), "$0.05");
        assert_eq!(format_growth(100.0), "+100.0%");
        assert_eq!(format_growth(-12.34), "-12.3%");
    }

    #[test]
    fn growth_message_tiers() {
        assert_eq!(growth_message(50.0), "The market is growing strongly!");
        assert_eq!(growth_message(10.0), "Postings are stable with slight growth.");
        assert_eq!(growth_message(0.5), "Postings are stable with slight growth.");
        assert_eq!(growth_message(0.0), "The market is currently stagnant.");
        assert_eq!(growth_message(-25.0), "The market is currently stagnant.");
    }

    #[test]
    fn empty_view_renders_without_insights() {
        let ds = load_csv_str(
            "job_id,job_title,industry,location,posting_date,salary_usd,skills_required,remote_option\n",
        )
        .unwrap();
        let dashboard = Dashboard::new(ds);
        let view = dashboard.compute(&dashboard.default_criteria());
        assert!(insights(&view).is_empty());
        let text = render_text(&view);
        assert!(text.contains("Average salary:    n/a"));
        assert!(text.contains("(no data)"));
    }

    #[test]
    fn insights_name_the_leaders() {
        let ds = load_csv_str(
            "job_id,job_title,industry,location,posting_date,salary_usd,skills_required,remote_option\n\
             1,Engineer,Tech,Berlin,2024-01-15,100000,Rust,Yes\n\
             2,Engineer,Tech,Paris,2024-02-10,120000,Rust,No\n",
        )
        .unwrap();
        let dashboard = Dashboard::new(ds);
        let view = dashboard.compute(&dashboard.default_criteria());
        let lines = insights(&view);
        assert!(lines[0].contains("average salary of $110,000.00"));
        assert!(lines.iter().any(|l| l.contains("The role Engineer leads with 2 postings")));
        assert!(lines.iter().any(|l| l.starts_with("Paris offers")));
        assert!(lines.contains(
            &"In February 2024, there were 1 new job postings. The market is currently stagnant."
                .to_string()
        ));
    }
}
