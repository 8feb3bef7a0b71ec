//! Normalization is the single boundary where untrusted server payloads become typed UI rows.
//!
//! Every function here is total: missing or malformed input maps to a documented
//! fallback value, never to an error or a panic.

pub mod fields;
pub mod format;
pub mod records;
pub mod status;

pub use format::{
    format_date, format_duration_minutes, format_score, relative_time, relative_time_now,
    salary_to_text, title_case, SalaryRange, PLACEHOLDER_DASH, PLACEHOLDER_EM_DASH,
};
pub use records::{
    ApplicationRow, InterviewQuestion, JobRow, JobStatus, OnboardingRecord, OnboardingTask,
    Timestamp,
};
pub use status::{Difficulty, HiringStatus, InterviewStatus};
