use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Deterministic splitmix64 stream, so every run writes the same file.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform index in [0, n).
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn one_in(&mut self, n: usize) -> bool {
        self.below(n) == 0
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// Salary spread ±`spread` around `base`, peaked at `base`
    /// (average of three uniforms), rounded to whole dollars.
    fn salary(&mut self, base: f64, spread: f64) -> f64 {
        let centred = (self.unit() + self.unit() + self.unit()) / 3.0 * 2.0 - 1.0;
        (base * (1.0 + spread * centred)).round()
    }
}

/// Raw CSV row, lower-case headers as exported by the source system.
#[derive(Serialize)]
struct Row {
    job_id: u32,
    job_title: String,
    industry: &'static str,
    location: &'static str,
    posting_date: String,
    salary_usd: String,
    skills_required: String,
    remote_option: &'static str,
}

const ROLES: [(&str, f64); 8] = [
    ("Quantum Software Engineer", 145_000.0),
    ("AI Ethics Officer", 120_000.0),
    ("Renewable Energy Analyst", 95_000.0),
    ("Smart City Planner", 105_000.0),
    ("Data Scientist", 130_000.0),
    ("Robotics Technician", 75_000.0),
    ("Cybersecurity Specialist", 125_000.0),
    ("Climate Risk Consultant", 110_000.0),
];
const INDUSTRIES: [&str; 6] = ["Technology", "Energy", "Healthcare", "Finance", "Manufacturing", "Government"];
const LOCATIONS: [&str; 7] = ["New York", "London", "Berlin", "Singapore", "Toronto", "Sydney", "Remote"];
const SKILLS: [&str; 10] = [
    "Python", "Machine Learning", "SQL", "Cloud Computing", "Data Analysis",
    "Communication", "Rust", "Project Management", "Statistics", "Cybersecurity",
];

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).context("invalid start date")?;
    let n_rows = 2_000u32;

    let output_path = "future_jobs_dataset.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for job_id in 1..=n_rows {
        let (title, base_salary) = ROLES[rng.below(ROLES.len())];

        // Later months get more postings: bias the offset towards the end.
        let offset = (rng.unit().sqrt() * 730.0) as i64;
        let posting_date = if rng.one_in(50) {
            "unknown".to_string()
        } else {
            (start + Duration::days(offset)).format("%Y-%m-%d").to_string()
        };

        let salary_usd = if rng.one_in(40) {
            String::new()
        } else {
            format!("{:.0}", rng.salary(base_salary, 0.3).max(30_000.0))
        };

        let n_skills = 1 + rng.below(4);
        let mut skills: Vec<&str> = Vec::with_capacity(n_skills);
        while skills.len() < n_skills {
            let s = rng.pick(&SKILLS);
            if !skills.contains(&s) {
                skills.push(s);
            }
        }

        writer
            .serialize(Row {
                job_id,
                job_title: title.to_string(),
                industry: rng.pick(&INDUSTRIES),
                location: rng.pick(&LOCATIONS),
                posting_date,
                salary_usd,
                skills_required: skills.join(", "),
                remote_option: if rng.one_in(3) { "Yes" } else { "No" },
            })
            .with_context(|| format!("writing row {job_id}"))?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {n_rows} job postings to {output_path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_is_deterministic() {
        let mut a = SampleRng(7);
        let mut b = SampleRng(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = SampleRng(42);
        for _ in 0..1_000 {
            assert!(rng.below(7) < 7);
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
            let s = rng.salary(100_000.0, 0.3);
            assert!((70_000.0..=130_000.0).contains(&s));
        }
    }
}
