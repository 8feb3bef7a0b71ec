//! Job posting wizard support: client-side checks that run before any write.

pub mod validation;

pub use validation::{validate_job_draft, DraftQuestion, JobDraft, JobPayload};
