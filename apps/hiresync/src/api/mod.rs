//! Endpoint contract for the recruiting backend.
//!
//! `HiringApi` is the seam the screens depend on; `HttpHiringApi` is the real
//! implementation on top of [`ResourceClient`]. Every read normalizes here, so
//! screens only ever see typed rows.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::client::ResourceClient;
use crate::errors::ClientError;
use crate::jobs::{validate_job_draft, JobDraft};
use crate::normalize::fields::{extract_list, extract_record};
use crate::normalize::{ApplicationRow, JobRow, OnboardingRecord};

const JOB_LIST_KEYS: &[&str] = &["jobs", "data", "items", "results"];
const APPLICATION_LIST_KEYS: &[&str] = &["applications", "data", "items", "results"];
const ONBOARDING_LIST_KEYS: &[&str] = &["onboardings", "onboarding", "data", "items"];

/// Reads and task mutations used by the screens.
#[async_trait]
pub trait HiringApi: Send + Sync {
    /// `GET /api/jobs`
    async fn list_jobs(&self) -> Result<Vec<JobRow>, ClientError>;

    /// `GET /api/jobs/me[?limit=]`, falling back to `GET /api/jobs`.
    async fn my_jobs(&self, limit: Option<u32>) -> Result<Vec<JobRow>, ClientError>;

    /// `GET /api/jobs/:id`
    async fn job_detail(&self, job_id: &str) -> Result<JobRow, ClientError>;

    /// `GET /api/applications/employer`, falling back to `GET /api/employer/applications`.
    async fn employer_applications(&self) -> Result<Vec<ApplicationRow>, ClientError>;

    /// `GET /api/onboarding`
    async fn onboarding_list(&self) -> Result<Vec<OnboardingRecord>, ClientError>;

    /// `GET /api/onboarding/:id`
    async fn onboarding_detail(&self, onboarding_id: &str)
        -> Result<OnboardingRecord, ClientError>;

    /// `PUT /api/onboarding/:id/task/:taskId`
    async fn set_task_completed(
        &self,
        onboarding_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<(), ClientError>;
}

/// Employer company profile as edited on the settings screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Finished AI interview analytics. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewAnalytics(pub Value);

/// A resume file picked for upload.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
    pub job_id: Option<String>,
}

#[derive(Clone)]
pub struct HttpHiringApi {
    client: ResourceClient,
}

impl HttpHiringApi {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    /// `POST /api/jobs`. Validation runs first; an invalid draft sends nothing.
    pub async fn create_job(&self, draft: &JobDraft) -> Result<JobRow, ClientError> {
        let payload = validate_job_draft(draft)?;
        let created: Value = self.client.post_json("/api/jobs", &payload).await?;
        info!("Created job '{}'", payload.title);
        Ok(JobRow::from_remote(extract_record(&created, &["job", "data"])))
    }

    /// `POST /api/applications/upload-resume` as multipart form data.
    pub async fn upload_resume(&self, upload: ResumeUpload) -> Result<Value, ClientError> {
        let ResumeUpload {
            file_name,
            content_type,
            bytes,
            job_id,
        } = upload;
        let length = bytes.len() as u64;
        let part = Part::stream_with_length(bytes, length)
            .file_name(file_name.clone())
            .mime_str(&content_type)
            .map_err(|_| {
                ClientError::Validation(format!("Unsupported resume content type '{content_type}'"))
            })?;
        let mut form = Form::new().part("resume", part);
        if let Some(job_id) = job_id {
            form = form.text("jobId", job_id);
        }
        let response = self
            .client
            .post_multipart("/api/applications/upload-resume", form)
            .await?;
        info!("Uploaded resume {file_name}");
        Ok(response)
    }

    /// `PUT /api/company-profile/me`
    pub async fn update_company_profile(
        &self,
        profile: &CompanyProfile,
    ) -> Result<Value, ClientError> {
        if profile.name.trim().is_empty() {
            return Err(ClientError::Validation(
                "Company name is required".to_string(),
            ));
        }
        self.client.put_json("/api/company-profile/me", profile).await
    }

    /// `PUT /api/onboarding`: creates or replaces an onboarding checklist.
    pub async fn upsert_onboarding(&self, body: &Value) -> Result<OnboardingRecord, ClientError> {
        let saved: Value = self.client.put_json("/api/onboarding", body).await?;
        Ok(OnboardingRecord::from_remote(extract_record(
            &saved,
            &["onboarding", "data"],
        )))
    }

    /// `GET /api/ai/analytics`
    pub async fn interview_analytics(&self) -> Result<InterviewAnalytics, ClientError> {
        self.client.get_json("/api/ai/analytics").await
    }
}

#[async_trait]
impl HiringApi for HttpHiringApi {
    async fn list_jobs(&self) -> Result<Vec<JobRow>, ClientError> {
        let payload: Value = self.client.get_json("/api/jobs").await?;
        Ok(normalize_jobs(&payload))
    }

    async fn my_jobs(&self, limit: Option<u32>) -> Result<Vec<JobRow>, ClientError> {
        let mine = match limit {
            Some(limit) => format!("/api/jobs/me?limit={limit}"),
            None => "/api/jobs/me".to_string(),
        };
        let payload: Value = self.client.get_first_ok(&[mine.as_str(), "/api/jobs"]).await?;
        Ok(normalize_jobs(&payload))
    }

    async fn job_detail(&self, job_id: &str) -> Result<JobRow, ClientError> {
        let payload: Value = self.client.get_json(&format!("/api/jobs/{job_id}")).await?;
        Ok(JobRow::from_remote(extract_record(&payload, &["job", "data"])))
    }

    async fn employer_applications(&self) -> Result<Vec<ApplicationRow>, ClientError> {
        let payload: Value = self
            .client
            .get_first_ok(&["/api/applications/employer", "/api/employer/applications"])
            .await?;
        Ok(extract_list(&payload, APPLICATION_LIST_KEYS)
            .iter()
            .map(|a| ApplicationRow::from_remote(Some(a)))
            .collect())
    }

    async fn onboarding_list(&self) -> Result<Vec<OnboardingRecord>, ClientError> {
        let payload: Value = self.client.get_json("/api/onboarding").await?;
        Ok(extract_list(&payload, ONBOARDING_LIST_KEYS)
            .iter()
            .map(|o| OnboardingRecord::from_remote(Some(o)))
            .collect())
    }

    async fn onboarding_detail(
        &self,
        onboarding_id: &str,
    ) -> Result<OnboardingRecord, ClientError> {
        let payload: Value = self
            .client
            .get_json(&format!("/api/onboarding/{onboarding_id}"))
            .await?;
        Ok(OnboardingRecord::from_remote(extract_record(
            &payload,
            &["onboarding", "data"],
        )))
    }

    async fn set_task_completed(
        &self,
        onboarding_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<(), ClientError> {
        let _: Value = self
            .client
            .put_json(
                &format!("/api/onboarding/{onboarding_id}/task/{task_id}"),
                &json!({ "completed": completed }),
            )
            .await?;
        Ok(())
    }
}

fn normalize_jobs(payload: &Value) -> Vec<JobRow> {
    extract_list(payload, JOB_LIST_KEYS)
        .iter()
        .map(|j| JobRow::from_remote(Some(j)))
        .collect()
}
