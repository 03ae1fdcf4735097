// src/engine/map.rs
use std::future::Future;

use tracing::debug;

use super::aggregate::collect_positional;
use super::outcome::Outcome;

/// Apply `func` to every value concurrently, collecting results by position.
///
/// `func` is called once per value, in `values` order, before any result
/// is looked at. Aggregation and error reporting match [`parallel`].
///
/// [`parallel`]: fn@super::parallel
pub async fn map<V, T, E, F, Fut>(values: Vec<V>, func: F) -> Outcome<Vec<Option<T>>, E>
where
    F: Fn(V) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if values.is_empty() {
        debug!("No values to map");
        return Outcome::empty();
    }

    debug!("Mapping {} values", values.len());
    let started: Vec<Fut> = values.into_iter().map(&func).collect();

    collect_positional(started).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::task::{callback_fn, Done};
    use futures::FutureExt;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_empty_resolves_on_first_poll() {
        let calls = AtomicUsize::new(0);
        let outcome = map(Vec::<u8>::new(), |value| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, String>(value) }
        })
        .now_or_never();

        assert_eq!(outcome, Some(Outcome::empty()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_identity() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let identity = callback_fn(move |value: u32, done: Done<u32, String>| {
            counter.fetch_add(1, Ordering::SeqCst);
            done.ok(value);
        });

        let outcome = map(vec![1, 2], identity).await;
        assert_eq!(outcome.into_parts(), (None, Some(vec![Some(1), Some(2)])));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_results_follow_value_order() {
        let outcome = map(vec![30u64, 5, 15], |millis| async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok::<_, String>(millis * 2)
        })
        .await;

        assert_eq!(outcome.value, Some(vec![Some(60), Some(10), Some(30)]));
    }

    #[tokio::test]
    async fn test_errors_do_not_stop_other_values() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let always_fails = callback_fn(move |value: u32, done: Done<u32, String>| {
            counter.fetch_add(1, Ordering::SeqCst);
            done.err(format!("error {}", value));
        });

        let outcome = map(vec![1, 2], always_fails).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.error.as_deref(), Some("error 2"));
        assert_eq!(outcome.value, Some(vec![None, None]));
    }

    #[tokio::test]
    async fn test_mixed_results() {
        let outcome = map(vec![1i32, -1, 3], |value| async move {
            if value < 0 {
                Err(format!("negative: {}", value))
            } else {
                Ok(value)
            }
        })
        .await;

        assert_eq!(outcome.error.as_deref(), Some("negative: -1"));
        assert_eq!(outcome.value, Some(vec![Some(1), None, Some(3)]));
    }

    #[tokio::test]
    async fn test_all_values_start_before_any_completes() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let spy = events.clone();
        let delayed = callback_fn(move |index: u64, done: Done<u64, String>| {
            spy.lock().push(format!("start {}", index));
            let events = spy.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10 * (3 - index))).await;
                events.lock().push(format!("done {}", index));
                done.ok(index * 10);
            });
        });

        let outcome = map(vec![0, 1, 2], delayed).await;
        assert_eq!(
            *events.lock(),
            vec!["start 0", "start 1", "start 2", "done 2", "done 1", "done 0"]
        );
        assert_eq!(outcome.into_parts(), (None, Some(vec![Some(0), Some(10), Some(20)])));
    }
}
