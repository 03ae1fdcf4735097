// src/engine/parallel.rs
use tracing::debug;

use super::aggregate::collect_positional;
use super::outcome::Outcome;
use super::task::ParallelTask;

/// Start every task without waiting and collect their results by position.
///
/// All tasks are invoked in declaration order before any completion is
/// looked at. Every task runs to completion even if others fail; the
/// outcome carries the last error observed and one slot per task (`None`
/// for failed tasks).
///
/// A task that succeeds after another one failed does not clear the error:
/// once any task has failed, the outcome's `error` stays set.
pub async fn parallel<T, E>(tasks: Vec<ParallelTask<T, E>>) -> Outcome<Vec<Option<T>>, E> {
    if tasks.is_empty() {
        debug!("No parallel tasks to run");
        return Outcome::empty();
    }

    debug!("Starting {} tasks in parallel", tasks.len());
    let started: Vec<_> = tasks.into_iter().map(|task| task.run(())).collect();

    let outcome = collect_positional(started).await;
    debug!("Parallel tasks finished (failed: {})", outcome.is_err());
    outcome
}
