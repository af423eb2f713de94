//! Background generation.
//!
//! Runs generation on tokio's blocking pool so the caller's thread stays
//! responsive. Only the latest submission can deliver: submitting again
//! resolves every earlier [`PendingGeneration`] with
//! [`TimetableError::Superseded`], and a stale run's result is discarded
//! when it finishes.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{info, warn};

use super::runner::{generate, GenerationRequest, GenerationResult};
use crate::error::TimetableError;

type Outcome = Result<GenerationResult, TimetableError>;
type Delivery = oneshot::Sender<Outcome>;

/// Slot holding the sender of the newest submission.
#[derive(Default)]
struct Latest {
    ticket: u64,
    sender: Option<Delivery>,
}

impl Latest {
    /// Registers a new submission and returns its ticket. Dropping the
    /// previous sender resolves the older handle as superseded.
    fn claim(&mut self, sender: Delivery) -> u64 {
        self.ticket += 1;
        if self.sender.replace(sender).is_some() {
            info!(ticket = self.ticket - 1, "Superseding in-flight generation");
        }
        self.ticket
    }

    /// Hands `result` to the waiting caller if `ticket` is still the newest.
    fn deliver(&mut self, ticket: u64, result: Outcome) -> bool {
        if self.ticket != ticket {
            warn!(ticket, newest = self.ticket, "Discarding superseded generation result");
            return false;
        }
        match self.sender.take() {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }
}

/// Single-flight generation worker.
///
/// Requires a tokio runtime at [`submit`](Self::submit) time.
#[derive(Clone, Default)]
pub struct GenerationWorker {
    latest: Arc<Mutex<Latest>>,
}

impl GenerationWorker {
    /// Creates an idle worker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts generating `request` in the background, superseding any run
    /// still in flight.
    pub fn submit(&self, request: GenerationRequest) -> PendingGeneration {
        let (tx, rx) = oneshot::channel();
        let ticket = self.latest.lock().claim(tx);

        let latest = Arc::clone(&self.latest);
        tokio::task::spawn_blocking(move || {
            let result = generate(&request);
            // A dropped receiver leaves nobody to notify.
            latest.lock().deliver(ticket, result);
        });

        PendingGeneration { ticket, rx }
    }

    /// Ticket of the most recent submission (0 before the first).
    pub fn current_ticket(&self) -> u64 {
        self.latest.lock().ticket
    }
}

/// Handle to a submitted generation.
#[derive(Debug)]
pub struct PendingGeneration {
    ticket: u64,
    rx: oneshot::Receiver<Outcome>,
}

impl PendingGeneration {
    /// Submission ticket, increasing per worker.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Waits for the result.
    ///
    /// Returns [`TimetableError::Superseded`] if a newer request was
    /// submitted first.
    pub async fn wait(self) -> Result<GenerationResult, TimetableError> {
        self.rx.await.unwrap_or(Err(TimetableError::Superseded))
    }
}
