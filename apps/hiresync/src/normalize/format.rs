use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::fields::{pick, scalar_text};

/// Placeholder used by the candidate job listing.
pub const PLACEHOLDER_DASH: &str = "-";
/// Placeholder used by the employer dashboard tables.
pub const PLACEHOLDER_EM_DASH: &str = "—";

/// Salary bounds as they arrive from the backend, already reduced to display text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub start: Option<String>,
    pub end: Option<String>,
    pub currency: Option<String>,
}

impl SalaryRange {
    /// Reads `salaryRange` / `salary_range` / `salary` from a job record.
    pub fn from_record(record: Option<&Value>) -> Self {
        let range = pick(record, &["salaryRange", "salary_range", "salary"]);
        let bound = |keys: &[&str]| pick(range, keys).and_then(scalar_text);
        SalaryRange {
            start: bound(&["start", "min", "from"]),
            end: bound(&["end", "max", "to"]),
            currency: bound(&["currency", "symbol"]),
        }
    }
}

/// Formats a salary range into one of four fixed shapes.
pub fn salary_to_text(range: &SalaryRange, placeholder: &str) -> String {
    let cur = range.currency.as_deref().unwrap_or("");
    match (range.start.as_deref(), range.end.as_deref()) {
        (Some(start), Some(end)) => format!("{cur}{start} - {cur}{end}"),
        (Some(start), None) => format!("{cur}{start}+"),
        (None, Some(end)) => format!("{cur}Up to {end}"),
        (None, None) => placeholder.to_string(),
    }
}

/// Parses ISO-8601 timestamps, including naive date-times and bare dates (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Coarse relative time: "Just now", "5 min ago", "3 hr ago", "2 days ago".
/// Unparseable input yields an empty string.
pub fn relative_time(raw: &str, now: DateTime<Utc>) -> String {
    let Some(at) = parse_timestamp(raw) else {
        return String::new();
    };
    relative_time_between(at, now)
}

pub fn relative_time_now(raw: &str) -> String {
    relative_time(raw, Utc::now())
}

pub(crate) fn relative_time_between(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds();
    if secs < 60 {
        return "Just now".to_string();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hr ago");
    }
    match hours / 24 {
        1 => "1 day ago".to_string(),
        days => format!("{days} days ago"),
    }
}

/// `full-time` → `Full Time`, `part_time` → `Part Time`.
pub fn title_case(raw: &str) -> String {
    raw.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().to_string() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `2026-10-19T08:00:00Z` → `Oct 19, 2026`.
pub fn format_date(raw: &str, placeholder: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| placeholder.to_string())
}

/// `90` → `1 hr 30 min`; non-positive durations render the placeholder.
pub fn format_duration_minutes(minutes: Option<f64>, placeholder: &str) -> String {
    let minutes = match minutes {
        Some(m) if m >= 1.0 => m.round() as u64,
        _ => return placeholder.to_string(),
    };
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} hr"),
        (h, m) => format!("{h} hr {m} min"),
    }
}

/// Interview score as a whole percentage. Scores in `0..=1` are treated as fractions.
pub fn format_score(score: Option<f64>, placeholder: &str) -> String {
    match score {
        Some(s) if (0.0..=1.0).contains(&s) && s.fract() != 0.0 => {
            format!("{}%", (s * 100.0).round() as i64)
        }
        Some(s) if s >= 0.0 => format!("{}%", s.round() as i64),
        _ => placeholder.to_string(),
    }
}
