use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::ClientError;
use crate::normalize::Difficulty;

pub const MSG_TITLE_REQUIRED: &str = "Job title is required";
pub const MSG_INTERVIEW_DURATION: &str = "Interview duration must be a valid number (>= 1)";
pub const MSG_SALARY_NUMBER: &str = "Salary range values must be valid numbers";
pub const MSG_SALARY_ORDER: &str = "Salary range start cannot be greater than end";

/// Raw job-wizard input, exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub salary_start: String,
    pub salary_end: String,
    pub currency: String,
    pub interview_duration: String,
    pub questions: Vec<DraftQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftQuestion {
    pub text: String,
    /// Whatever the difficulty control produced: a code, a word, or nothing.
    pub difficulty: Value,
}

/// A validated job ready for `POST /api/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub title: String,
    pub description: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary_range: Value,
    pub interview_duration: u32,
    pub questions: Vec<Value>,
}

/// Checks a draft before anything is sent. The first failing rule wins.
pub fn validate_job_draft(draft: &JobDraft) -> Result<JobPayload, ClientError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ClientError::Validation(MSG_TITLE_REQUIRED.to_string()));
    }

    let interview_duration = parse_duration(&draft.interview_duration)
        .ok_or_else(|| ClientError::Validation(MSG_INTERVIEW_DURATION.to_string()))?;

    let salary_start = parse_optional_number(&draft.salary_start)?;
    let salary_end = parse_optional_number(&draft.salary_end)?;
    if let (Some(start), Some(end)) = (salary_start, salary_end) {
        if start > end {
            return Err(ClientError::Validation(MSG_SALARY_ORDER.to_string()));
        }
    }

    let currency = match draft.currency.trim() {
        "" => "$",
        c => c,
    };

    let questions = draft
        .questions
        .iter()
        .filter(|q| !q.text.trim().is_empty())
        .map(|q| {
            json!({
                "question": q.text.trim(),
                "difficulty": Difficulty::from_value(Some(&q.difficulty)).label(),
            })
        })
        .collect();

    Ok(JobPayload {
        title: title.to_string(),
        description: draft.description.trim().to_string(),
        department: non_empty(&draft.department),
        location: non_empty(&draft.location),
        employment_type: non_empty(&draft.employment_type).map(|t| t.to_lowercase()),
        salary_range: json!({
            "start": salary_start,
            "end": salary_end,
            "currency": currency,
        }),
        interview_duration,
        questions,
    })
}

fn parse_duration(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 1.0 && value <= u32::MAX as f64).then(|| value.round() as u32)
}

fn parse_optional_number(raw: &str) -> Result<Option<f64>, ClientError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(Some)
        .ok_or_else(|| ClientError::Validation(MSG_SALARY_NUMBER.to_string()))
}

fn non_empty(raw: &str) -> Option<String> {
    let t = raw.trim();
    (!t.is_empty()).then(|| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> JobDraft {
        JobDraft {
            title: "Data Engineer".into(),
            description: "Pipelines".into(),
            location: "Remote".into(),
            employment_type: "Full-Time".into(),
            salary_start: "12".into(),
            salary_end: "15".into(),
            currency: "$".into(),
            interview_duration: "30".into(),
            questions: vec![
                DraftQuestion {
                    text: "Describe a backfill".into(),
                    difficulty: serde_json::json!(2),
                },
                DraftQuestion {
                    text: "  ".into(),
                    difficulty: Value::Null,
                },
            ],
            ..JobDraft::default()
        }
    }

    fn message(result: Result<JobPayload, ClientError>) -> String {
        match result {
            Err(ClientError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_draft() {
        let payload = validate_job_draft(&draft()).unwrap();
        assert_eq!(payload.title, "Data Engineer");
        assert_eq!(payload.interview_duration, 30);
        assert_eq!(payload.employment_type.as_deref(), Some("full-time"));
        assert_eq!(payload.department, None);
        assert_eq!(payload.questions.len(), 1);
        assert_eq!(payload.questions[0]["difficulty"], "Medium");
        assert_eq!(payload.salary_range["start"], 12.0);
    }

    #[test]
    fn test_title_required() {
        let mut d = draft();
        d.title = "   ".into();
        assert_eq!(message(validate_job_draft(&d)), MSG_TITLE_REQUIRED);
    }

    #[test]
    fn test_zero_interview_duration_rejected() {
        let mut d = draft();
        d.interview_duration = "0".into();
        assert_eq!(
            message(validate_job_draft(&d)),
            "Interview duration must be a valid number (>= 1)"
        );
    }

    #[test]
    fn test_non_numeric_interview_duration_rejected() {
        for raw in ["", "abc", "-5", "NaN", "0.5"] {
            let mut d = draft();
            d.interview_duration = raw.into();
            assert_eq!(message(validate_job_draft(&d)), MSG_INTERVIEW_DURATION, "input {raw:?}");
        }
    }

    #[test]
    fn test_salary_rules() {
        let mut d = draft();
        d.salary_start = "twelve".into();
        assert_eq!(message(validate_job_draft(&d)), MSG_SALARY_NUMBER);

        let mut d = draft();
        d.salary_start = "20".into();
        assert_eq!(message(validate_job_draft(&d)), MSG_SALARY_ORDER);

        let mut d = draft();
        d.salary_start = String::new();
        d.salary_end = String::new();
        d.currency = String::new();
        let payload = validate_job_draft(&d).unwrap();
        assert!(payload.salary_range["start"].is_null());
        assert_eq!(payload.salary_range["currency"], "$");
    }
}
