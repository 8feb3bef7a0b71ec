use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical lookup key: lower-cased with whitespace and underscores removed.
pub fn status_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Interview status. Unrecognized input is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterviewStatus {
    Completed,
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl InterviewStatus {
    pub fn parse(raw: &str) -> Self {
        match status_key(raw).as_str() {
            "completed" | "complete" | "done" | "finished" | "scored" => Self::Completed,
            "inprogress" | "in-progress" | "started" | "ongoing" | "active" => Self::InProgress,
            _ => Self::Pending,
        }
    }

    pub fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_str)
            .map(Self::parse)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hiring pipeline status. Unrecognized input is `UnderReview`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HiringStatus {
    Invited,
    #[default]
    #[serde(rename = "Under Review")]
    UnderReview,
    Shortlisted,
    Hired,
    Rejected,
}

impl HiringStatus {
    pub fn parse(raw: &str) -> Self {
        match status_key(raw).as_str() {
            "invited" | "invite" | "interviewinvited" => Self::Invited,
            "shortlisted" | "shortlist" => Self::Shortlisted,
            "hired" | "accepted" | "offeraccepted" => Self::Hired,
            "rejected" | "declined" | "notselected" => Self::Rejected,
            _ => Self::UnderReview,
        }
    }

    pub fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_str)
            .map(Self::parse)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Invited => "Invited",
            Self::UnderReview => "Under Review",
            Self::Shortlisted => "Shortlisted",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for HiringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Interview question difficulty. Unrecognized input is `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Self {
        let key = status_key(raw);
        if let Ok(code) = key.parse::<f64>() {
            return Self::from_code(code);
        }
        match key.as_str() {
            "low" | "easy" => Self::Easy,
            "high" | "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }

    fn from_code(code: f64) -> Self {
        if code == 1.0 {
            Self::Easy
        } else if code == 3.0 {
            Self::Hard
        } else {
            Self::Medium
        }
    }

    /// Accepts numeric codes 1/2/3 as numbers or strings, and word variants.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map(Self::from_code).unwrap_or_default(),
            Some(Value::String(s)) => Self::parse(s),
            _ => Self::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Numeric code used by write endpoints.
    pub fn code(&self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_key_strips_separators() {
        assert_eq!(status_key(" In_Progress "), "inprogress");
        assert_eq!(status_key("UNDER REVIEW"), "underreview");
    }

    #[test]
    fn test_interview_status_variants() {
        assert_eq!(InterviewStatus::parse("COMPLETED"), InterviewStatus::Completed);
        assert_eq!(InterviewStatus::parse("in_progress"), InterviewStatus::InProgress);
        assert_eq!(InterviewStatus::parse("In Progress"), InterviewStatus::InProgress);
        assert_eq!(InterviewStatus::parse("pending"), InterviewStatus::Pending);
    }

    #[test]
    fn test_interview_status_unknown_defaults_to_pending() {
        assert_eq!(InterviewStatus::parse("exploded"), InterviewStatus::Pending);
        assert_eq!(InterviewStatus::from_value(None), InterviewStatus::Pending);
        assert_eq!(
            InterviewStatus::from_value(Some(&json!(42))),
            InterviewStatus::Pending
        );
    }

    #[test]
    fn test_hiring_status_variants() {
        assert_eq!(HiringStatus::parse("hired"), HiringStatus::Hired);
        assert_eq!(HiringStatus::parse("Short_listed"), HiringStatus::Shortlisted);
        assert_eq!(HiringStatus::parse("REJECTED"), HiringStatus::Rejected);
        assert_eq!(HiringStatus::parse("invited"), HiringStatus::Invited);
    }

    #[test]
    fn test_hiring_status_unknown_defaults_to_under_review() {
        assert_eq!(HiringStatus::parse("applied"), HiringStatus::UnderReview);
        assert_eq!(HiringStatus::parse(""), HiringStatus::UnderReview);
        assert_eq!(HiringStatus::from_value(None), HiringStatus::UnderReview);
    }

    #[test]
    fn test_difficulty_number_word_and_label_agree() {
        assert_eq!(Difficulty::from_value(Some(&json!(2))), Difficulty::Medium);
        assert_eq!(Difficulty::from_value(Some(&json!("mid"))), Difficulty::Medium);
        assert_eq!(Difficulty::from_value(Some(&json!("Medium"))), Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_easy_and_hard() {
        assert_eq!(Difficulty::from_value(Some(&json!(1))), Difficulty::Easy);
        assert_eq!(Difficulty::from_value(Some(&json!("low"))), Difficulty::Easy);
        assert_eq!(Difficulty::from_value(Some(&json!("3"))), Difficulty::Hard);
        assert_eq!(Difficulty::from_value(Some(&json!("HIGH"))), Difficulty::Hard);
    }

    #[test]
    fn test_difficulty_numeric_text_matches_numbers() {
        for (text, number) in [("1.0", json!(1.0)), ("3.0", json!(3.0)), (" 2 ", json!(2))] {
            assert_eq!(
                Difficulty::from_value(Some(&json!(text))),
                Difficulty::from_value(Some(&number)),
                "input {text:?}"
            );
        }
        assert_eq!(Difficulty::parse("1.0"), Difficulty::Easy);
        assert_eq!(Difficulty::parse("3.0"), Difficulty::Hard);
        assert_eq!(Difficulty::parse("7"), Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_unknown_defaults_to_medium() {
        assert_eq!(Difficulty::from_value(Some(&json!(7))), Difficulty::Medium);
        assert_eq!(Difficulty::from_value(Some(&json!("extreme"))), Difficulty::Medium);
        assert_eq!(Difficulty::from_value(None), Difficulty::Medium);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = ["done", "in progress", "weird", "", "Completed", "In Progress"];
        for raw in inputs {
            let once = InterviewStatus::parse(raw);
            assert_eq!(InterviewStatus::parse(once.label()), once, "input {raw:?}");
        }

        let inputs = ["hired", "short list", "nope", "Under Review", "invited"];
        for raw in inputs {
            let once = HiringStatus::parse(raw);
            assert_eq!(HiringStatus::parse(once.label()), once, "input {raw:?}");
        }

        let inputs = [json!(1), json!(2), json!(3), json!("easy"), json!("x"), json!(null)];
        for raw in inputs {
            let once = Difficulty::from_value(Some(&raw));
            assert_eq!(Difficulty::parse(once.label()), once, "input {raw:?}");
        }
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(
            serde_json::to_value(HiringStatus::UnderReview).unwrap(),
            json!("Under Review")
        );
        assert_eq!(
            serde_json::to_value(InterviewStatus::InProgress).unwrap(),
            json!("In Progress")
        );
    }
}
