//! Screen state owners. Each screen struct is the only writer of its collections:
//! fetch completions and optimistic edits both go through its `&mut self` methods.

pub mod dashboard;
pub mod job_board;
pub mod onboarding;

use tracing::debug;

use crate::errors::ClientError;
use crate::fetch::{SelectionGuard, SelectionTicket};

pub use dashboard::{Dashboard, DashboardStats};
pub use job_board::JobBoard;
pub use onboarding::{OnboardingBoard, TaskMutationOutcome};

/// Detail view for the currently selected list item.
#[derive(Debug)]
pub struct DetailPane<T> {
    guard: SelectionGuard,
    selected: Option<String>,
    detail: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for DetailPane<T> {
    fn default() -> Self {
        Self {
            guard: SelectionGuard::new(),
            selected: None,
            detail: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> DetailPane<T> {
    /// Switches the selection; any in-flight fetch for the old one is abandoned.
    pub fn select(&mut self, id: &str) -> SelectionTicket {
        let ticket = self.guard.select();
        self.selected = Some(id.to_string());
        self.detail = None;
        self.loading = true;
        self.error = None;
        ticket
    }

    /// Applies a detail result if its ticket is still current.
    /// Returns `false` when the result was discarded.
    pub fn resolve(&mut self, ticket: &SelectionTicket, result: Result<T, ClientError>) -> bool {
        if !ticket.is_relevant() {
            debug!("Dropping detail result for stale selection {}", ticket.generation());
            return false;
        }
        self.loading = false;
        match result {
            Ok(detail) => self.detail = Some(detail),
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }

    pub fn clear(&mut self) {
        self.guard.clear();
        self.selected = None;
        self.detail = None;
        self.loading = false;
        self.error = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&T> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
