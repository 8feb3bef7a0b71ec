//! Activity feed: folds independently fetched collections into one recent-activity list.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::normalize::{ApplicationRow, HiringStatus, JobRow, OnboardingRecord, Timestamp};

/// Default number of events shown on the dashboard.
pub const DEFAULT_FEED_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedIcon {
    Check,
    Dismiss,
    Clock,
    Briefcase,
    Clipboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedColor {
    Green,
    Red,
    Orange,
    Blue,
    Purple,
}

/// One row of the activity feed. Rebuilt on every refresh, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub icon: FeedIcon,
    pub color: FeedColor,
    pub title: String,
    pub description: String,
    pub timestamp: Timestamp,
}

/// Fixed status → style table for hiring events.
pub fn hiring_status_style(status: HiringStatus) -> (FeedIcon, FeedColor) {
    match status {
        HiringStatus::Hired => (FeedIcon::Check, FeedColor::Green),
        HiringStatus::Rejected => (FeedIcon::Dismiss, FeedColor::Red),
        _ => (FeedIcon::Clock, FeedColor::Orange),
    }
}

/// Source-specific projection into a feed event.
pub trait FeedSource {
    fn to_activity(&self) -> ActivityEvent;
}

impl FeedSource for JobRow {
    fn to_activity(&self) -> ActivityEvent {
        ActivityEvent {
            icon: FeedIcon::Briefcase,
            color: FeedColor::Blue,
            title: "New job posted".to_string(),
            description: format!("{} · {}", self.title, self.location),
            timestamp: self.posted_at.clone(),
        }
    }
}

impl FeedSource for ApplicationRow {
    fn to_activity(&self) -> ActivityEvent {
        let (icon, color) = hiring_status_style(self.status);
        let title = match self.status {
            HiringStatus::Hired => "Candidate hired",
            HiringStatus::Rejected => "Application rejected",
            HiringStatus::Shortlisted => "Candidate shortlisted",
            HiringStatus::Invited => "Interview invitation sent",
            HiringStatus::UnderReview => "New application received",
        };
        ActivityEvent {
            icon,
            color,
            title: title.to_string(),
            description: format!("{} for {}", self.candidate_name, self.job_title),
            timestamp: self.updated_at.clone(),
        }
    }
}

impl FeedSource for OnboardingRecord {
    fn to_activity(&self) -> ActivityEvent {
        let title = if self.is_complete() {
            "Onboarding completed"
        } else {
            "Onboarding in progress"
        };
        ActivityEvent {
            icon: FeedIcon::Clipboard,
            color: FeedColor::Purple,
            title: title.to_string(),
            description: format!(
                "{}: {}/{} tasks done",
                self.employee_name,
                self.completed_count(),
                self.tasks.len()
            ),
            timestamp: self.updated_at.clone(),
        }
    }
}

/// Projects a whole collection, preserving its order.
pub fn project<T: FeedSource>(items: &[T]) -> Vec<ActivityEvent> {
    items.iter().map(FeedSource::to_activity).collect()
}

/// Merges projected sources newest-first and keeps the top `limit`.
///
/// Ordering is total and deterministic: descending timestamp, ties kept in
/// source order then item order. Missing timestamps sort as the epoch, i.e.
/// last. Truncation happens only after the full sort.
pub fn merge_feeds<I>(sources: I, limit: usize) -> Vec<ActivityEvent>
where
    I: IntoIterator<Item = Vec<ActivityEvent>>,
{
    let mut events: Vec<ActivityEvent> = sources.into_iter().flatten().collect();
    events.sort_by_key(|e| Reverse(e.timestamp.sort_key()));
    events.truncate(limit);
    events
}
