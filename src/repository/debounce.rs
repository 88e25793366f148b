use super::FlowRepository;
use crate::error::RepositoryError;
use crate::flow::Flow;
use std::time::{Duration, Instant};

/// Trailing-edge debounce for flow saves.
///
/// Every edit hands the latest snapshot to `touch`, which restarts the
/// timer. The host polls with its own clock; the snapshot comes out once no
/// edit has arrived for `delay`. Edits made before the snapshot is saved are
/// lost if the process dies, which is acceptable for a local authoring tool.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay: Duration,
    pending: Option<(Flow, Instant)>,
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::with_delay(Duration::from_secs(1))
    }
}

impl SaveDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces the pending snapshot and restarts the timer at `now`.
    pub fn touch(&mut self, flow: Flow, now: Instant) {
        self.pending = Some((flow, now + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the snapshot if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Flow> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due { self.flush() } else { None }
    }

    /// Takes the snapshot regardless of the timer.
    pub fn flush(&mut self) -> Option<Flow> {
        self.pending.take().map(|(flow, _)| flow)
    }

    /// Polls and writes a due snapshot to `repository`. Returns whether a
    /// save happened.
    pub fn save_due<R: FlowRepository + ?Sized>(
        &mut self,
        now: Instant,
        repository: &mut R,
    ) -> Result<bool, RepositoryError> {
        match self.poll(now) {
            Some(flow) => {
                repository.put(flow)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
