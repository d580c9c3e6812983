//! Per-session run bookkeeping.
//!
//! Holds the most recent [`ReconResult`] of a session. Runs may overlap; a
//! result is only published if no run that started later has already
//! published, so the surfaced result always belongs to the newest finished run
//! and a slow earlier run can never overwrite it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ReconConfig;
use crate::engine::{self, ReconInput};
use crate::error::ReconError;
use crate::model::ReconResult;

/// Issued when a run starts; orders runs by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What the caller should show for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No comparison has completed yet.
    NotRun,
    /// The latest published run and its discrepancy count (may be 0).
    Completed { run: RunTicket, discrepancies: usize },
}

/// Outcome of handing a finished result to the session.
#[derive(Debug, Clone)]
pub enum Publication {
    Published(Arc<ReconResult>),
    /// A newer run already published; this result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    next_id: u64,
    published: Option<(RunTicket, Arc<ReconResult>)>,
}

#[derive(Debug, Default)]
pub struct ReconSession {
    state: Mutex<SessionState>,
}

impl ReconSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a run. Later tickets always compare greater.
    pub fn begin(&self) -> RunTicket {
        let mut state = self.lock();
        state.next_id += 1;
        RunTicket(state.next_id)
    }

    /// Publish a finished run unless a newer run already did.
    pub fn publish(&self, ticket: RunTicket, result: ReconResult) -> Publication {
        let mut state = self.lock();
        if let Some((current, _)) = &state.published {
            if *current > ticket {
                log::warn!(
                    "discarding result of run {} (run {} already published)",
                    ticket.id(),
                    current.id()
                );
                return Publication::Superseded;
            }
        }
        let result = Arc::new(result);
        state.published = Some((ticket, Arc::clone(&result)));
        Publication::Published(result)
    }

    /// Begin, execute and publish one run.
    ///
    /// A failed run (e.g. missing input) publishes nothing and leaves the
    /// previous result in place.
    pub fn run(&self, config: &ReconConfig, input: &ReconInput) -> Result<Publication, ReconError> {
        let ticket = self.begin();
        let result = engine::run(config, input)?;
        Ok(self.publish(ticket, result))
    }

    pub fn latest(&self) -> Option<Arc<ReconResult>> {
        self.lock().published.as_ref().map(|(_, r)| Arc::clone(r))
    }

    pub fn status(&self) -> RunStatus {
        match &self.lock().published {
            None => RunStatus::NotRun,
            Some((run, result)) => RunStatus::Completed {
                run: *run,
                discrepancies: result.discrepancies.len(),
            },
        }
    }
}
