use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use log::{info, warn};
use serde_json::Value as JsonValue;

use super::model::{columns, JobDataset, JobPosting};
use super::normalize::{canonical_label, clean_title, parse_date, parse_salary, text_cell};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the job postings dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row plus one posting per record
/// * `.json` – `[{ "job_id": ..., "job_title": ..., ... }, ...]`
///
/// Column labels are canonicalised before lookup, so `job_title`,
/// `JOB_TITLE` and ` Job_Title` are all accepted.
pub fn load_file(path: &Path) -> Result<JobDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let dataset = normalize_rows(rows);
    info!(
        "loaded {} postings from {} ({} titles, {} locations)",
        dataset.len(),
        path.display(),
        dataset.job_titles.len(),
        dataset.locations.len()
    );
    Ok(dataset)
}

/// Parse CSV text that is already in memory.
pub fn load_csv_str(text: &str) -> Result<JobDataset, LoadError> {
    let rows = read_csv_records(csv_reader(text.as_bytes()), Path::new("<memory>"))?;
    Ok(normalize_rows(rows))
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One source row before coercion, keyed by canonical column label.
#[derive(Debug, Default)]
struct RawRow {
    cells: BTreeMap<&'static str, Option<String>>,
}

impl RawRow {
    fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

fn missing_column(path: &Path, present: &HashSet<String>) -> Option<LoadError> {
    columns::REQUIRED
        .iter()
        .find(|c| !present.contains(**c))
        .map(|c| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: *c,
        })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_records(csv_reader(file), path)
}

/// Ragged rows are accepted; cells past the end of a short row read as empty.
fn csv_reader<R: std::io::Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().flexible(true).from_reader(source)
}

fn read_csv_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<RawRow>, LoadError> {
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(canonical_label)
        .collect();

    let present: HashSet<String> = headers.iter().cloned().collect();
    if let Some(err) = missing_column(path, &present) {
        return Err(err);
    }

    // Position of each required column in the record.
    let index: Vec<(&'static str, usize)> = columns::REQUIRED
        .iter()
        .filter_map(|c| headers.iter().position(|h| h.as_str() == *c).map(|i| (*c, i)))
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let mut row = RawRow::default();
        for (column, i) in &index {
            row.cells.insert(*column, text_cell(record.get(*i)));
        }
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `to_json(orient='records')` layout).
fn read_json(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = root.as_array().ok_or_else(|| LoadError::NotRecords {
        path: path.to_path_buf(),
    })?;

    let mut present: HashSet<String> = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for rec in records {
        let Some(obj) = rec.as_object() else {
            return Err(LoadError::NotRecords {
                path: path.to_path_buf(),
            });
        };
        let mut row = RawRow::default();
        for (key, val) in obj {
            let label = canonical_label(key);
            if let Some(column) = columns::REQUIRED.iter().find(|c| **c == label) {
                row.cells.insert(*column, json_to_text(val));
            }
            present.insert(label);
        }
        rows.push(row);
    }

    if !rows.is_empty() {
        if let Some(err) = missing_column(path, &present) {
            return Err(err);
        }
    }
    Ok(rows)
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => text_cell(Some(s)),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn normalize_rows(rows: Vec<RawRow>) -> JobDataset {
    let mut bad_dates = 0usize;
    let mut bad_salaries = 0usize;
    let mut seen_ids: HashSet<String> = HashSet::with_capacity(rows.len());
    let mut duplicate_ids = 0usize;

    let postings: Vec<JobPosting> = rows
        .into_iter()
        .map(|row| {
            let posting_date = row.get(columns::POSTING_DATE).and_then(parse_date);
            if posting_date.is_none() && row.get(columns::POSTING_DATE).is_some() {
                bad_dates += 1;
            }
            let salary_usd = row.get(columns::SALARY_USD).and_then(parse_salary);
            if salary_usd.is_none() && row.get(columns::SALARY_USD).is_some() {
                bad_salaries += 1;
            }

            let job_id = row.get(columns::JOB_ID).unwrap_or_default().to_string();
            if !seen_ids.insert(job_id.clone()) {
                duplicate_ids += 1;
            }

            JobPosting {
                job_id,
                title: row.get(columns::JOB_TITLE).map(clean_title),
                industry: text_cell(row.get(columns::INDUSTRY)),
                location: text_cell(row.get(columns::LOCATION)),
                posting_date,
                salary_usd,
                skills_required: text_cell(row.get(columns::SKILLS_REQUIRED)),
                remote_option: text_cell(row.get(columns::REMOTE_OPTION)),
            }
        })
        .collect();

    if bad_dates > 0 {
        warn!("{bad_dates} posting dates could not be parsed and were set to null");
    }
    if bad_salaries > 0 {
        warn!("{bad_salaries} salaries could not be parsed and were set to null");
    }
    if duplicate_ids > 0 {
        warn!("{duplicate_ids} rows reuse an existing job id");
    }

    JobDataset::from_postings(postings)
}
