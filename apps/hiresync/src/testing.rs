//! In-memory `HiringApi` for screen tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::HiringApi;
use crate::errors::ClientError;
use crate::normalize::{ApplicationRow, JobRow, OnboardingRecord};

type Queue<T> = Mutex<VecDeque<Result<T, ClientError>>>;

/// Replays queued responses in order. An exhausted queue answers with a 503.
#[derive(Default)]
pub struct StubHiringApi {
    pub jobs: Queue<Vec<JobRow>>,
    pub applications: Queue<Vec<ApplicationRow>>,
    pub job_details: Queue<JobRow>,
    pub onboarding: Queue<Vec<OnboardingRecord>>,
    pub onboarding_details: Queue<OnboardingRecord>,
    pub task_results: Queue<()>,
    pub task_calls: Mutex<Vec<(String, String, bool)>>,
    pub job_limits: Mutex<Vec<Option<u32>>>,
    pub calls: AtomicUsize,
}

impl StubHiringApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next<T>(&self, queue: &Queue<T>, what: &str) -> Result<T, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(http_error(503, &format!("no stubbed {what}"))))
    }
}

pub fn push<T>(queue: &Queue<T>, response: Result<T, ClientError>) {
    queue.lock().unwrap().push_back(response);
}

pub fn http_error(status: u16, message: &str) -> ClientError {
    ClientError::Http {
        status,
        url: "http://stub.local".to_string(),
        message: message.to_string(),
    }
}

pub fn job(record: Value) -> JobRow {
    JobRow::from_remote(Some(&record))
}

pub fn application(record: Value) -> ApplicationRow {
    ApplicationRow::from_remote(Some(&record))
}

pub fn onboarding(record: Value) -> OnboardingRecord {
    OnboardingRecord::from_remote(Some(&record))
}

#[async_trait]
impl HiringApi for StubHiringApi {
    async fn list_jobs(&self) -> Result<Vec<JobRow>, ClientError> {
        self.next(&self.jobs, "jobs")
    }

    async fn my_jobs(&self, limit: Option<u32>) -> Result<Vec<JobRow>, ClientError> {
        self.job_limits.lock().unwrap().push(limit);
        self.next(&self.jobs, "jobs")
    }

    async fn job_detail(&self, _job_id: &str) -> Result<JobRow, ClientError> {
        self.next(&self.job_details, "job detail")
    }

    async fn employer_applications(&self) -> Result<Vec<ApplicationRow>, ClientError> {
        self.next(&self.applications, "applications")
    }

    async fn onboarding_list(&self) -> Result<Vec<OnboardingRecord>, ClientError> {
        self.next(&self.onboarding, "onboarding list")
    }

    async fn onboarding_detail(
        &self,
        _onboarding_id: &str,
    ) -> Result<OnboardingRecord, ClientError> {
        self.next(&self.onboarding_details, "onboarding detail")
    }

    async fn set_task_completed(
        &self,
        onboarding_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<(), ClientError> {
        self.task_calls.lock().unwrap().push((
            onboarding_id.to_string(),
            task_id.to_string(),
            completed,
        ));
        self.next(&self.task_results, "task update")
    }
}
