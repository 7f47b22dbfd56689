use chrono::{DateTime, NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Column labels
// ---------------------------------------------------------------------------

/// Canonicalise a column label: trim, then title-case every alphabetic run.
///
/// `" job_title"`, `"JOB_TITLE"` and `"Job_Title"` all become `"Job_Title"`.
pub fn canonical_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Title cleanup
// ---------------------------------------------------------------------------

/// Marketing keywords stripped from job titles (case-sensitive).
pub const NOISE_TOKENS: [&str; 3] = ["Quantum", "Renewable", "Smart"];

/// Remove every noise token from `title`.
///
/// Removal repeats until nothing changes, so a token re-formed by an earlier
/// removal is stripped too and `clean_title(clean_title(x)) == clean_title(x)`.
/// Whitespace around removed tokens is left in place apart from a final trim.
pub fn clean_title(title: &str) -> String {
    let mut current = title.to_string();
    loop {
        let mut next = current.clone();
        for token in NOISE_TOKENS {
            next = next.replace(token, "");
        }
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Empty cells are missing values; anything else is kept verbatim.
pub fn text_cell(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a posting date, keeping only the calendar date. Unparseable → `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Some(d);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parse a salary in USD. Unparseable or non-finite → `None`.
pub fn parse_salary(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
