use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Tracks which detail selection is current for one screen.
///
/// Every selection takes a [`SelectionTicket`]. Taking a new ticket supersedes
/// and aborts all earlier ones, so a slow response for an old selection can
/// never overwrite the detail of the newer one.
#[derive(Debug, Clone, Default)]
pub struct SelectionGuard {
    generation: Arc<AtomicU64>,
    current_abort: Arc<std::sync::Mutex<Option<Arc<AtomicBool>>>>,
}

impl SelectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new selection and aborts the previous one.
    pub fn select(&self) -> SelectionTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let aborted = Arc::new(AtomicBool::new(false));

        if let Ok(mut current) = self.current_abort.lock() {
            if let Some(previous) = current.replace(aborted.clone()) {
                previous.store(true, Ordering::SeqCst);
            }
        }

        SelectionTicket {
            generation,
            current: self.generation.clone(),
            aborted,
        }
    }

    /// Aborts the current selection without starting another.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut current) = self.current_abort.lock() {
            if let Some(previous) = current.take() {
                previous.store(true, Ordering::SeqCst);
            }
        }
    }
}

/// Relevance flag captured when a detail request starts.
#[derive(Debug, Clone)]
pub struct SelectionTicket {
    generation: u64,
    current: Arc<AtomicU64>,
    aborted: Arc<AtomicBool>,
}

impl SelectionTicket {
    /// Explicit abort signal; the in-flight request may still finish.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    /// Still the newest selection and not aborted.
    pub fn is_relevant(&self) -> bool {
        !self.is_aborted() && self.current.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Awaits `fetch` and hands back its output only if the ticket is still relevant.
    pub async fn load_detail<T, Fut>(&self, fetch: Fut) -> Option<T>
    where
        Fut: Future<Output = T>,
    {
        let output = fetch.await;
        if self.is_relevant() {
            Some(output)
        } else {
            debug!(
                "Discarding detail response for superseded selection {}",
                self.generation
            );
            None
        }
    }
}
