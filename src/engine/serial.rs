// src/engine/serial.rs
use tracing::{debug, trace};

use super::outcome::Outcome;
use super::task::SerialTask;

/// Run tasks one at a time, feeding each task the previous task's result.
///
/// The first task receives `None`. The first error stops the chain and
/// the remaining tasks are never invoked. On success only the last
/// task's result is kept.
pub async fn serial<T, E>(tasks: Vec<SerialTask<T, E>>) -> Outcome<T, E> {
    if tasks.is_empty() {
        debug!("No serial tasks to run");
        return Outcome::empty();
    }

    let total = tasks.len();
    debug!("Running {} tasks in series", total);

    let mut previous = None;
    for (index, task) in tasks.into_iter().enumerate() {
        trace!("Starting serial task {}/{}", index + 1, total);

        match task.run(previous.take()).await {
            Ok(value) => previous = Some(value),
            Err(error) => {
                debug!("Serial task {} failed, skipping {} remaining", index, total - index - 1);
                return Outcome::failure(error);
            }
        }
    }

    Outcome {
        error: None,
        value: previous,
    }
}
