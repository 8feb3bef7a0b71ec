use tracing::{info, warn};

use crate::api::HiringApi;
use crate::errors::ClientError;
use crate::fetch::SelectionTicket;
use crate::normalize::{JobRow, PLACEHOLDER_DASH};
use crate::screens::DetailPane;

/// Job list with a side panel for the selected posting.
#[derive(Debug, Default)]
pub struct JobBoard {
    jobs: Vec<JobRow>,
    detail: DetailPane<JobRow>,
    loading: bool,
    error: Option<String>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &dyn HiringApi) -> Result<(), ClientError> {
        self.loading = true;
        let result = api.list_jobs().await;
        self.loading = false;

        match result {
            Ok(jobs) => {
                info!("Loaded {} jobs", jobs.len());
                self.jobs = jobs;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load jobs: {e}");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn jobs(&self) -> &[JobRow] {
        &self.jobs
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn detail(&self) -> &DetailPane<JobRow> {
        &self.detail
    }

    /// Salary column text; the job table uses a plain dash when unknown.
    pub fn salary_cell(job: &JobRow) -> String {
        job.salary_text(PLACEHOLDER_DASH)
    }

    pub fn select(&mut self, job_id: &str) -> SelectionTicket {
        self.detail.select(job_id)
    }

    pub fn resolve_detail(
        &mut self,
        ticket: &SelectionTicket,
        result: Result<JobRow, ClientError>,
    ) -> bool {
        self.detail.resolve(ticket, result)
    }

    /// Selects `job_id` and loads its detail in one step.
    pub async fn open(&mut self, api: &dyn HiringApi, job_id: &str) -> bool {
        let ticket = self.select(job_id);
        let result = api.job_detail(job_id).await;
        self.resolve_detail(&ticket, result)
    }

    pub fn close(&mut self) {
        self.detail.clear();
    }
}
