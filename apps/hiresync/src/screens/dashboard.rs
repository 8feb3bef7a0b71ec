use serde::Serialize;
use tracing::{info, warn};

use crate::api::HiringApi;
use crate::feed::{merge_feeds, project, ActivityEvent};
use crate::normalize::{ApplicationRow, HiringStatus, InterviewStatus, JobRow, JobStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub open_jobs: usize,
    pub total_applicants: usize,
    pub pending_interviews: usize,
    pub shortlisted: usize,
    pub hired: usize,
}

impl DashboardStats {
    pub fn compute(jobs: &[JobRow], applications: &[ApplicationRow]) -> Self {
        let count = |status: HiringStatus| {
            applications
                .iter()
                .filter(|a| a.status == status)
                .count()
        };
        // Job rows carry an applicant count even when the applications endpoint is down.
        let counted_on_jobs: usize = jobs.iter().map(|j| j.applicants as usize).sum();

        DashboardStats {
            open_jobs: jobs.iter().filter(|j| j.status == JobStatus::Active).count(),
            total_applicants: applications.len().max(counted_on_jobs),
            pending_interviews: applications
                .iter()
                .filter(|a| a.interview_status != InterviewStatus::Completed)
                .count(),
            shortlisted: count(HiringStatus::Shortlisted),
            hired: count(HiringStatus::Hired),
        }
    }
}

/// Employer dashboard: recent jobs, applications, headline stats and the activity feed.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub jobs: Vec<JobRow>,
    pub applications: Vec<ApplicationRow>,
    pub stats: DashboardStats,
    pub feed: Vec<ActivityEvent>,
    /// One message per source that failed to load.
    pub errors: Vec<String>,
}

impl Dashboard {
    /// Loads both sources concurrently. A failing source degrades to an empty
    /// list; the other one still renders.
    pub async fn load(api: &dyn HiringApi, jobs_limit: Option<u32>, feed_limit: usize) -> Self {
        let (jobs, applications) = tokio::join!(api.my_jobs(jobs_limit), api.employer_applications());

        let mut errors = Vec::new();
        let jobs = jobs.unwrap_or_else(|e| {
            warn!("Dashboard jobs unavailable: {e}");
            errors.push(e.to_string());
            Vec::new()
        });
        let applications = applications.unwrap_or_else(|e| {
            warn!("Dashboard applications unavailable: {e}");
            errors.push(e.to_string());
            Vec::new()
        });

        let mut dashboard = Self::from_parts(jobs, applications, feed_limit);
        dashboard.errors = errors;
        info!(
            "Dashboard loaded: {} jobs, {} applications, {} feed events",
            dashboard.jobs.len(),
            dashboard.applications.len(),
            dashboard.feed.len()
        );
        dashboard
    }

    pub fn from_parts(jobs: Vec<JobRow>, applications: Vec<ApplicationRow>, feed_limit: usize) -> Self {
        let stats = DashboardStats::compute(&jobs, &applications);
        let feed = merge_feeds([project(&jobs), project(&applications)], feed_limit);
        Dashboard {
            jobs,
            applications,
            stats,
            feed,
            errors: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::feed::{FeedColor, FeedIcon, DEFAULT_FEED_LIMIT};
    use crate::testing::{application, http_error, job, push, StubHiringApi};

    fn jobs() -> Vec<JobRow> {
        vec![
            job(json!({"_id": "j1", "title": "Backend", "location": "Remote", "createdAt": "2026-10-01T10:00:00Z", "applicants": 3})),
            job(json!({"_id": "j2", "title": "Design", "status": "closed", "createdAt": "2026-10-05T10:00:00Z"})),
        ]
    }

    fn applications() -> Vec<ApplicationRow> {
        vec![
            application(json!({"_id": "a1", "candidate": {"name": "Ada"}, "job": {"title": "Backend"}, "status": "hired", "interviewStatus": "completed", "updatedAt": "2026-10-10T10:00:00Z"})),
            application(json!({"_id": "a2", "candidate": {"name": "Linus"}, "job": {"title": "Backend"}, "status": "shortlisted", "updatedAt": "2026-10-03T10:00:00Z"})),
            application(json!({"_id": "a3", "candidate": {"name": "Grace"}, "job": {"title": "Backend"}, "status": "rejected", "updatedAt": 1_760_000_000_000_i64})),
            application(json!({"_id": "a4", "candidate": {"name": "Ken"}, "job": {"title": "Backend"}})),
        ]
    }

    #[test]
    fn test_stats() {
        let stats = DashboardStats::compute(&jobs(), &applications());
        assert_eq!(stats.open_jobs, 1);
        assert_eq!(stats.total_applicants, 4);
        assert_eq!(stats.pending_interviews, 3);
        assert_eq!(stats.shortlisted, 1);
        assert_eq!(stats.hired, 1);
    }

    #[test]
    fn test_feed_is_merged_newest_first_and_truncated() {
        let dashboard = Dashboard::from_parts(jobs(), applications(), DEFAULT_FEED_LIMIT);
        let titles: Vec<&str> = dashboard.feed.iter().map(|e| e.title.as_str()).collect();

        assert_eq!(
            titles,
            vec![
                "Candidate hired",
                "New job posted",
                "Candidate shortlisted",
                "New job posted",
            ]
        );
        assert_eq!(dashboard.feed[0].icon, FeedIcon::Check);
        assert_eq!(dashboard.feed[0].color, FeedColor::Green);
    }

    #[tokio::test]
    async fn test_load_degrades_failed_source() {
        let api = StubHiringApi::new();
        push(&api.jobs, Ok(jobs()));
        push(&api.applications, Err(http_error(500, "applications down")));

        let dashboard = Dashboard::load(&api, Some(5), DEFAULT_FEED_LIMIT).await;

        assert_eq!(dashboard.jobs.len(), 2);
        assert!(dashboard.applications.is_empty());
        assert_eq!(dashboard.errors, vec!["applications down".to_string()]);
        assert!(dashboard.is_degraded());
        assert_eq!(dashboard.stats.total_applicants, 3);
        assert_eq!(dashboard.feed.len(), 2);
        assert_eq!(api.job_limits.lock().unwrap().as_slice(), &[Some(5)]);
    }

    #[tokio::test]
    async fn test_load_empty_sources() {
        let api = StubHiringApi::new();
        push(&api.jobs, Ok(Vec::new()));
        push(&api.applications, Ok(Vec::new()));

        let dashboard = Dashboard::load(&api, None, DEFAULT_FEED_LIMIT).await;

        assert!(dashboard.feed.is_empty());
        assert!(!dashboard.is_degraded());
        assert_eq!(dashboard.stats, DashboardStats::default());
    }
}
