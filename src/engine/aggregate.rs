// src/engine/aggregate.rs
use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tracing::{debug, trace, warn};

use super::outcome::Outcome;

/// Positional collector for one `parallel` or `map` invocation.
///
/// Results land in the slot of the task's declaration index, never in
/// completion order. A later success does not clear an earlier error.
#[derive(Debug)]
pub struct Aggregator<T, E> {
    slots: Vec<Option<T>>,
    recorded: Vec<bool>,
    completed: usize,
    error: Option<E>,
}

impl<T, E> Aggregator<T, E> {
    /// Create an aggregator expecting `expected` completions
    pub fn new(expected: usize) -> Self {
        Self {
            slots: (0..expected).map(|_| None).collect(),
            recorded: vec![false; expected],
            completed: 0,
            error: None,
        }
    }

    /// Record the completion of the task at `index`.
    ///
    /// Returns `true` once every expected task has completed. Out-of-range
    /// or repeated indexes are ignored.
    pub fn record(&mut self, index: usize, result: Result<T, E>) -> bool {
        match self.recorded.get_mut(index) {
            Some(seen) if !*seen => *seen = true,
            _ => {
                warn!("Ignoring unexpected completion for slot {}", index);
                return self.is_complete();
            }
        }

        match result {
            Ok(value) => self.slots[index] = Some(value),
            Err(error) => {
                debug!("Task {} failed", index);
                self.error = Some(error);
            }
        }
        self.completed += 1;

        trace!("{}/{} tasks completed", self.completed, self.slots.len());
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.slots.len()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Consume the aggregator into the combinator's outcome
    pub fn finish(self) -> Outcome<Vec<Option<T>>, E> {
        Outcome {
            error: self.error,
            value: Some(self.slots),
        }
    }
}

/// Drive already-started futures to completion and aggregate them by position
pub(crate) async fn collect_positional<T, E, Fut>(started: Vec<Fut>) -> Outcome<Vec<Option<T>>, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    let mut aggregator = Aggregator::new(started.len());
    let mut pending: FuturesUnordered<_> = started
        .into_iter()
        .enumerate()
        .map(|(index, future)| future.map(move |result| (index, result)))
        .collect();

    while let Some((index, result)) = pending.next().await {
        aggregator.record(index, result);
    }

    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_index_not_arrival() {
        let mut aggregator: Aggregator<&str, &str> = Aggregator::new(2);

        assert!(!aggregator.record(1, Ok("test2")));
        assert!(aggregator.record(0, Ok("test1")));

        let outcome = aggregator.finish();
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.value, Some(vec![Some("test1"), Some("test2")]));
    }

    #[test]
    fn test_last_error_wins_and_success_does_not_clear_it() {
        let mut aggregator: Aggregator<u8, &str> = Aggregator::new(3);

        aggregator.record(2, Err("first"));
        aggregator.record(0, Err("second"));
        aggregator.record(1, Ok(1));

        let outcome = aggregator.finish();
        assert_eq!(outcome.error, Some("second"));
        assert_eq!(outcome.value, Some(vec![None, Some(1), None]));
    }

    #[test]
    fn test_repeated_completion_is_ignored() {
        let mut aggregator: Aggregator<u8, &str> = Aggregator::new(2);

        aggregator.record(0, Ok(1));
        assert!(!aggregator.record(0, Ok(2)));
        assert!(!aggregator.record(5, Ok(3)));
        assert_eq!(aggregator.completed(), 1);
    }
}
