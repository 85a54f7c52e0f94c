//! Fan-out / fan-in driver shared by both pipeline stages
//!
//! One task is spawned per input. Tasks push their values onto a shared
//! channel and finish with a `Result` that acts as their completion signal.
//! Only the driver loop touches the caller's accumulator, so tasks never
//! share mutable state.

use crate::ScrapeError;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Capacity of the data channel; tasks block until the driver takes each value
const HANDOFF_CAPACITY: usize = 1;

/// Completion counts for one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageOutcome {
    /// Number of tasks spawned
    pub dispatched: usize,

    /// Number of tasks that ended in an error or aborted
    pub failed: usize,
}

/// Runs one task per input and feeds every emitted value to `sink`
///
/// Returns once every dispatched task has signalled completion. Task errors
/// are logged and counted, never propagated, and do not affect sibling
/// tasks.
///
/// # Arguments
///
/// * `stage` - Stage name used in log events
/// * `inputs` - One task is spawned per input
/// * `task` - Builds the task future from an input and a sender for its values
/// * `sink` - Receives every emitted value, in arrival order
pub async fn run_stage<I, T, F, Fut, S>(
    stage: &'static str,
    inputs: I,
    task: F,
    mut sink: S,
) -> StageOutcome
where
    I: IntoIterator<Item = String>,
    T: Send + 'static,
    F: Fn(String, mpsc::Sender<T>) -> Fut,
    Fut: Future<Output = Result<(), ScrapeError>> + Send + 'static,
    S: FnMut(T),
{
    let (tx, mut rx) = mpsc::channel::<T>(HANDOFF_CAPACITY);
    let mut tasks = JoinSet::new();

    for input in inputs {
        tasks.spawn(task(input, tx.clone()));
    }
    drop(tx);

    let dispatched = tasks.len();
    let mut completed = 0;
    let mut failed = 0;

    tracing::debug!(stage, dispatched, "Stage started");

    while completed < dispatched {
        tokio::select! {
            Some(value) = rx.recv() => sink(value),
            Some(joined) = tasks.join_next() => {
                completed += 1;
                match joined {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        failed += 1;
                        tracing::warn!(stage, error = %e, "Task failed");
                    }
                    Err(e) => {
                        failed += 1;
                        let error = ScrapeError::Task(e.to_string());
                        tracing::warn!(stage, error = %error, "Task aborted");
                    }
                }
            }
            else => break,
        }
    }

    // A task may complete before the driver has taken its last value
    while let Ok(value) = rx.try_recv() {
        sink(value);
    }

    tracing::debug!(stage, dispatched, failed, "Stage finished");

    StageOutcome { dispatched, failed }
}
