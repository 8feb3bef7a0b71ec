use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::fields::{
    extract_list, pick, pick_bool, pick_f64, pick_text, pick_text_or, value_as_f64,
};
use crate::normalize::format::{
    format_date, format_duration_minutes, format_score, parse_timestamp, relative_time_between,
    salary_to_text, title_case, SalaryRange, PLACEHOLDER_EM_DASH,
};
use crate::normalize::status::{status_key, Difficulty, HiringStatus, InterviewStatus};

// ────────────────────────────────────────────────────────────────────────────
// Timestamps
// ────────────────────────────────────────────────────────────────────────────

/// A record timestamp as sent by the backend: ISO text or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Timestamp {
    Iso(String),
    EpochMillis(i64),
    #[default]
    Missing,
}

impl Timestamp {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) if !s.trim().is_empty() => Timestamp::Iso(s.trim().to_string()),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(Timestamp::EpochMillis)
                .unwrap_or(Timestamp::Missing),
            _ => Timestamp::Missing,
        }
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Iso(raw) => parse_timestamp(raw),
            Timestamp::EpochMillis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            Timestamp::Missing => None,
        }
    }

    /// Milliseconds since the epoch; missing or unparseable timestamps sort as 0.
    pub fn sort_key(&self) -> i64 {
        self.to_datetime()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }

    pub fn is_missing(&self) -> bool {
        self.to_datetime().is_none()
    }

    pub fn relative(&self, now: DateTime<Utc>) -> String {
        self.to_datetime()
            .map(|at| relative_time_between(at, now))
            .unwrap_or_default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JobStatus {
    #[default]
    Active,
    Draft,
    Closed,
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match status_key(raw).as_str() {
            "draft" | "unpublished" => Self::Draft,
            "closed" | "filled" | "archived" | "expired" | "inactive" => Self::Closed,
            _ => Self::Active,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Draft => "Draft",
            Self::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub text: String,
    pub difficulty: Difficulty,
}

impl InterviewQuestion {
    pub fn from_remote(record: Option<&Value>) -> Self {
        // Questions may be bare strings or objects.
        if let Some(Value::String(text)) = record {
            return InterviewQuestion {
                text: text.trim().to_string(),
                difficulty: Difficulty::Medium,
            };
        }
        InterviewQuestion {
            text: pick_text_or(record, &["question", "text", "prompt"], ""),
            difficulty: Difficulty::from_value(pick(record, &["difficulty", "level"])),
        }
    }
}

/// A job posting as shown in job tables and the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRow {
    pub id: String,
    pub title: String,
    pub company: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub salary_range: SalaryRange,
    pub salary: String,
    pub status: JobStatus,
    pub applicants: u32,
    pub interview_duration: String,
    pub questions: Vec<InterviewQuestion>,
    pub posted_at: Timestamp,
    pub posted: String,
}

impl JobRow {
    pub fn from_remote(record: Option<&Value>) -> Self {
        Self::from_remote_at(record, Utc::now())
    }

    pub fn from_remote_at(record: Option<&Value>, now: DateTime<Utc>) -> Self {
        let salary_range = SalaryRange::from_record(record);
        let posted_at = Timestamp::from_value(pick(
            record,
            &["createdAt", "created_at", "postedAt", "posted_at", "publishedAt"],
        ));
        let applicants = match pick(
            record,
            &["applicantCount", "applicantsCount", "applicationCount", "applicants"],
        ) {
            Some(Value::Array(items)) => items.len() as u32,
            Some(v) => value_as_f64(v).map(|n| n.max(0.0) as u32).unwrap_or(0),
            None => 0,
        };
        let questions = pick(record, &["questions", "interviewQuestions", "aiQuestions"])
            .map(|q| extract_list(q, &["items"]))
            .unwrap_or(&[])
            .iter()
            .map(|q| InterviewQuestion::from_remote(Some(q)))
            .filter(|q| !q.text.is_empty())
            .collect();

        JobRow {
            id: pick_text_or(record, &["_id", "id", "jobId"], ""),
            title: pick_text_or(record, &["title", "jobTitle", "job_title", "position"], "Untitled role"),
            company: pick_text_or(
                record,
                &["company.name", "companyName", "company_name", "company"],
                PLACEHOLDER_EM_DASH,
            ),
            department: pick_text_or(record, &["department", "team"], PLACEHOLDER_EM_DASH),
            location: pick_text_or(record, &["location", "workLocation", "city"], PLACEHOLDER_EM_DASH),
            employment_type: pick_text(record, &["employmentType", "employment_type", "jobType", "type"])
                .map(|t| title_case(&t))
                .unwrap_or_else(|| PLACEHOLDER_EM_DASH.to_string()),
            salary: salary_to_text(&salary_range, PLACEHOLDER_EM_DASH),
            salary_range,
            status: pick_text(record, &["status", "state"])
                .map(|s| JobStatus::parse(&s))
                .unwrap_or_default(),
            applicants,
            interview_duration: format_duration_minutes(
                pick_f64(record, &["interviewDuration", "interview_duration", "duration"]),
                PLACEHOLDER_EM_DASH,
            ),
            questions,
            posted: posted_at.relative(now),
            posted_at,
        }
    }

    /// Salary text with a call-site placeholder.
    pub fn salary_text(&self, placeholder: &str) -> String {
        salary_to_text(&self.salary_range, placeholder)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

/// An applicant's application to one job, as shown in employer tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRow {
    pub id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_id: String,
    pub job_title: String,
    pub status: HiringStatus,
    pub interview_status: InterviewStatus,
    pub score: String,
    pub applied_at: Timestamp,
    pub updated_at: Timestamp,
    pub applied: String,
}

impl ApplicationRow {
    pub fn from_remote(record: Option<&Value>) -> Self {
        Self::from_remote_at(record, Utc::now())
    }

    pub fn from_remote_at(record: Option<&Value>, now: DateTime<Utc>) -> Self {
        let applied_at = Timestamp::from_value(pick(
            record,
            &["appliedAt", "applied_at", "createdAt", "created_at"],
        ));
        let updated_at = match Timestamp::from_value(pick(
            record,
            &["statusUpdatedAt", "updatedAt", "updated_at"],
        )) {
            Timestamp::Missing => applied_at.clone(),
            ts => ts,
        };

        ApplicationRow {
            id: pick_text_or(record, &["_id", "id", "applicationId"], ""),
            candidate_name: pick_text_or(
                record,
                &[
                    "candidate.name",
                    "candidate.fullName",
                    "applicant.name",
                    "applicant.fullName",
                    "candidateName",
                    "name",
                ],
                "Unknown candidate",
            ),
            candidate_email: pick_text_or(
                record,
                &["candidate.email", "applicant.email", "candidateEmail", "email"],
                PLACEHOLDER_EM_DASH,
            ),
            job_id: pick_text_or(record, &["job._id", "job.id", "jobId", "job_id"], ""),
            job_title: pick_text_or(
                record,
                &["job.title", "jobTitle", "job_title", "position"],
                PLACEHOLDER_EM_DASH,
            ),
            status: HiringStatus::from_value(pick(
                record,
                &["status", "hiringStatus", "applicationStatus"],
            )),
            interview_status: InterviewStatus::from_value(pick(
                record,
                &["interviewStatus", "interview.status", "interview_status"],
            )),
            score: format_score(
                pick_f64(
                    record,
                    &["interview.score", "aiScore", "score", "overallScore"],
                ),
                PLACEHOLDER_EM_DASH,
            ),
            applied: applied_at.relative(now),
            applied_at,
            updated_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Onboarding
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub completed: bool,
    pub due: String,
}

impl OnboardingTask {
    pub fn from_remote(record: Option<&Value>) -> Self {
        let completed = pick_bool(record, &["completed", "isCompleted", "done"]).unwrap_or_else(|| {
            pick_text(record, &["status"])
                .map(|s| InterviewStatus::parse(&s) == InterviewStatus::Completed)
                .unwrap_or(false)
        });

        OnboardingTask {
            id: pick_text_or(record, &["_id", "id", "taskId"], ""),
            title: pick_text_or(record, &["title", "name", "task"], "Untitled task"),
            description: pick_text_or(record, &["description", "details"], ""),
            category: pick_text(record, &["category", "type"])
                .map(|c| title_case(&c))
                .unwrap_or_else(|| "General".to_string()),
            completed,
            due: pick_text(record, &["dueDate", "due_date", "due"])
                .map(|d| format_date(&d, PLACEHOLDER_EM_DASH))
                .unwrap_or_else(|| PLACEHOLDER_EM_DASH.to_string()),
        }
    }
}

/// One employee's onboarding checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingRecord {
    pub id: String,
    pub employee_name: String,
    pub role: String,
    pub start_date: String,
    pub tasks: Vec<OnboardingTask>,
    /// Whole-percent completion, always derived from `tasks`.
    pub progress: u8,
    pub updated_at: Timestamp,
}

impl OnboardingRecord {
    pub fn from_remote(record: Option<&Value>) -> Self {
        let tasks = pick(record, &["tasks", "checklist", "items"])
            .map(|t| extract_list(t, &["items", "tasks"]))
            .unwrap_or(&[])
            .iter()
            .map(|t| OnboardingTask::from_remote(Some(t)))
            .collect();

        let mut normalized = OnboardingRecord {
            id: pick_text_or(record, &["_id", "id", "onboardingId"], ""),
            employee_name: pick_text_or(
                record,
                &["employee.name", "employeeName", "candidate.name", "name"],
                "Unknown employee",
            ),
            role: pick_text_or(record, &["role", "position", "job.title", "jobTitle"], PLACEHOLDER_EM_DASH),
            start_date: pick_text(record, &["startDate", "start_date"])
                .map(|d| format_date(&d, PLACEHOLDER_EM_DASH))
                .unwrap_or_else(|| PLACEHOLDER_EM_DASH.to_string()),
            tasks,
            progress: 0,
            updated_at: Timestamp::from_value(pick(
                record,
                &["updatedAt", "updated_at", "createdAt", "created_at"],
            )),
        };
        normalized.recompute_progress();
        normalized
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn recompute_progress(&mut self) {
        self.progress = if self.tasks.is_empty() {
            0
        } else {
            ((self.completed_count() * 100) as f64 / self.tasks.len() as f64).round() as u8
        };
    }

    pub fn task(&self, task_id: &str) -> Option<&OnboardingTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut OnboardingTask> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn is_complete(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.completed)
    }
}
