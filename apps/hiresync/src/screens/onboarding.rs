//! Onboarding checklist screen.
//!
//! Task toggles are optimistic: the checkbox and progress bar change before the
//! request is sent. A rejected toggle reloads the whole record from the server
//! and replaces the local copy.

use tracing::{debug, info, warn};

use crate::api::HiringApi;
use crate::errors::ClientError;
use crate::fetch::{SelectionGuard, SelectionTicket};
use crate::mutate::{
    AckOutcome, EditKey, EditTicket, FailureOutcome, OptimisticMutator, OptimisticTarget,
};
use crate::normalize::OnboardingRecord;

pub fn task_field(task_id: &str) -> String {
    format!("tasks.{task_id}.completed")
}

fn task_id_of(field_path: &str) -> Option<&str> {
    field_path.strip_prefix("tasks.")?.strip_suffix(".completed")
}

impl OptimisticTarget<bool> for Vec<OnboardingRecord> {
    fn read_field(&self, key: &EditKey) -> Option<bool> {
        let task_id = task_id_of(&key.field_path)?;
        self.iter()
            .find(|r| r.id == key.entity_id)?
            .task(task_id)
            .map(|t| t.completed)
    }

    fn write_field(&mut self, key: &EditKey, value: bool) -> bool {
        let Some(task_id) = task_id_of(&key.field_path) else {
            return false;
        };
        let Some(record) = self.iter_mut().find(|r| r.id == key.entity_id) else {
            return false;
        };
        let Some(task) = record.task_mut(task_id) else {
            return false;
        };
        task.completed = value;
        record.recompute_progress();
        true
    }
}

/// A toggle that has been applied locally and still awaits the server.
#[derive(Debug, Clone)]
pub struct PendingTask {
    pub onboarding_id: String,
    pub task_id: String,
    pub completed: bool,
    ticket: EditTicket,
}

#[derive(Debug)]
pub enum TaskMutationOutcome {
    Confirmed,
    /// A newer toggle of the same task owns the outcome.
    Superseded,
    /// The server rejected the toggle; the record was reloaded.
    Reconciled(ClientError),
    /// The server rejected the toggle and the reload failed too. The optimistic
    /// value stays on screen until the next successful load.
    ReconcileFailed {
        mutation: ClientError,
        reload: ClientError,
    },
}

impl TaskMutationOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TaskMutationOutcome::Confirmed)
    }
}

#[derive(Debug, Default)]
pub struct OnboardingBoard {
    records: Vec<OnboardingRecord>,
    selected: Option<String>,
    guard: SelectionGuard,
    mutator: OptimisticMutator<bool>,
    loading: bool,
    error: Option<String>,
}

impl OnboardingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[OnboardingRecord] {
        &self.records
    }

    pub fn record(&self, onboarding_id: &str) -> Option<&OnboardingRecord> {
        self.records.iter().find(|r| r.id == onboarding_id)
    }

    pub fn selected(&self) -> Option<&OnboardingRecord> {
        self.selected.as_deref().and_then(|id| self.record(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_pending(&self) -> bool {
        self.mutator.has_pending()
    }

    /// Loads the checklist list. On failure the previous records stay visible.
    pub async fn load(&mut self, api: &dyn HiringApi) -> Result<(), ClientError> {
        self.loading = true;
        let result = api.onboarding_list().await;
        self.loading = false;

        match result {
            Ok(records) => {
                info!("Loaded {} onboarding checklists", records.len());
                self.records = records;
                self.error = None;
                let ids: Vec<String> = self.records.iter().map(|r| r.id.clone()).collect();
                for id in &ids {
                    self.mutator.reapply_pending(&mut self.records, id);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load onboarding checklists: {e}");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn select(&mut self, onboarding_id: &str) -> SelectionTicket {
        self.selected = Some(onboarding_id.to_string());
        self.guard.select()
    }

    /// Applies a detail fetch if `ticket` is still the current selection.
    pub fn apply_detail(
        &mut self,
        ticket: &SelectionTicket,
        result: Result<OnboardingRecord, ClientError>,
    ) -> bool {
        if !ticket.is_relevant() {
            debug!("Ignoring onboarding detail for stale selection");
            return false;
        }
        match result {
            Ok(record) => self.replace_record(record),
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }

    pub async fn open(&mut self, api: &dyn HiringApi, onboarding_id: &str) -> bool {
        let ticket = self.select(onboarding_id);
        let result = api.onboarding_detail(onboarding_id).await;
        self.apply_detail(&ticket, result)
    }

    /// Sets a task's completion locally. Returns `None` for an unknown task.
    pub fn begin_task_update(
        &mut self,
        onboarding_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Option<PendingTask> {
        let key = EditKey::new(onboarding_id, task_field(task_id));
        let ticket = self.mutator.apply(&mut self.records, key, completed)?;
        Some(PendingTask {
            onboarding_id: onboarding_id.to_string(),
            task_id: task_id.to_string(),
            completed,
            ticket,
        })
    }

    pub fn begin_toggle(&mut self, onboarding_id: &str, task_id: &str) -> Option<PendingTask> {
        let key = EditKey::new(onboarding_id, task_field(task_id));
        let current = self.records.read_field(&key)?;
        self.begin_task_update(onboarding_id, task_id, !current)
    }

    /// Feeds the server's answer for `pending` back into the board.
    pub async fn settle(
        &mut self,
        api: &dyn HiringApi,
        pending: PendingTask,
        result: Result<(), ClientError>,
    ) -> TaskMutationOutcome {
        let mutation = match result {
            Ok(()) => {
                return match self.mutator.acknowledge(&pending.ticket) {
                    AckOutcome::Resolved => TaskMutationOutcome::Confirmed,
                    AckOutcome::Superseded => TaskMutationOutcome::Superseded,
                };
            }
            Err(e) => e,
        };

        if self.mutator.fail(&pending.ticket) == FailureOutcome::Superseded {
            debug!(
                "Ignoring failure of superseded edit {}: {mutation}",
                pending.ticket.key
            );
            return TaskMutationOutcome::Superseded;
        }

        warn!(
            "Task {} update rejected: {mutation}. Reloading onboarding {}",
            pending.task_id, pending.onboarding_id
        );
        self.error = Some(mutation.to_string());

        let outcome = match api.onboarding_detail(&pending.onboarding_id).await {
            Ok(fresh) => {
                self.replace_record(fresh);
                TaskMutationOutcome::Reconciled(mutation)
            }
            Err(reload) => {
                warn!(
                    "Reload of onboarding {} failed: {reload}",
                    pending.onboarding_id
                );
                TaskMutationOutcome::ReconcileFailed { mutation, reload }
            }
        };
        self.mutator.finish_reconcile(&pending.ticket.key);
        outcome
    }

    /// Optimistically sets a task and sends `PUT /api/onboarding/:id/task/:taskId`.
    pub async fn set_task(
        &mut self,
        api: &dyn HiringApi,
        onboarding_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<TaskMutationOutcome, ClientError> {
        let pending = self
            .begin_task_update(onboarding_id, task_id, completed)
            .ok_or_else(|| unknown_task(onboarding_id, task_id))?;
        let result = api
            .set_task_completed(onboarding_id, task_id, completed)
            .await;
        Ok(self.settle(api, pending, result).await)
    }

    pub async fn toggle_task(
        &mut self,
        api: &dyn HiringApi,
        onboarding_id: &str,
        task_id: &str,
    ) -> Result<TaskMutationOutcome, ClientError> {
        let pending = self
            .begin_toggle(onboarding_id, task_id)
            .ok_or_else(|| unknown_task(onboarding_id, task_id))?;
        let result = api
            .set_task_completed(onboarding_id, task_id, pending.completed)
            .await;
        Ok(self.settle(api, pending, result).await)
    }

    fn replace_record(&mut self, fresh: OnboardingRecord) {
        let id = fresh.id.clone();
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(slot) => *slot = fresh,
            None => self.records.push(fresh),
        }
        self.mutator.reapply_pending(&mut self.records, &id);
    }
}

fn unknown_task(onboarding_id: &str, task_id: &str) -> ClientError {
    ClientError::Validation(format!(
        "Task {task_id} not found in onboarding {onboarding_id}"
    ))
}
