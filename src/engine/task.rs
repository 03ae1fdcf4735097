// src/engine/task.rs
use std::future::Future;

use futures::future::{self, BoxFuture, FutureExt};
use tokio::sync::oneshot;
use tracing::warn;

/// Future produced by invoking a task
pub type TaskFuture<T, E> = BoxFuture<'static, Result<T, E>>;

/// A task taking the previous task's result (`None` for the first one)
pub type SerialTask<T, E> = Box<dyn Task<Option<T>, T, E>>;

/// A task taking no input
pub type ParallelTask<T, E> = Box<dyn Task<(), T, E>>;

/// A unit of asynchronous work.
///
/// `run` consumes the task, so a task can be invoked at most once. Work
/// that happens inside `run` itself (before the future is returned) is the
/// task's synchronous start; everything else happens when the combinator
/// polls the returned future.
pub trait Task<I, T, E>: Send {
    /// Invoke the task with its input
    fn run(self: Box<Self>, input: I) -> TaskFuture<T, E>;
}

impl<F, Fut, I, T, E> Task<I, T, E> for F
where
    F: FnOnce(I) -> Fut + Send,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    fn run(self: Box<Self>, input: I) -> TaskFuture<T, E> {
        (*self)(input).boxed()
    }
}

/// Completion handle handed to callback-style tasks.
///
/// Consuming `self` makes a second completion impossible.
#[derive(Debug)]
pub struct Done<T, E> {
    tx: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Done<T, E> {
    fn channel() -> (Self, oneshot::Receiver<Result<T, E>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Complete successfully
    pub fn ok(self, value: T) {
        self.complete(Ok(value));
    }

    /// Complete with an error
    pub fn err(self, error: E) {
        self.complete(Err(error));
    }

    /// Complete with an already-built result
    pub fn complete(self, result: Result<T, E>) {
        // The receiver only goes away when the combinator future was dropped.
        let _ = self.tx.send(result);
    }
}

/// Box an async closure as a serial task
pub fn serial_task<T, E, F, Fut>(f: F) -> SerialTask<T, E>
where
    F: FnOnce(Option<T>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: 'static,
    E: 'static,
{
    Box::new(f)
}

/// Box an async closure as a parallel task
pub fn parallel_task<T, E, F, Fut>(f: F) -> ParallelTask<T, E>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: 'static,
    E: 'static,
{
    Box::new(move |()| f())
}

/// Adapt an error-first callback function into a task.
///
/// `f` runs synchronously when the task is invoked and may complete the
/// `Done` handle right away or hand it to something that completes later.
/// If the handle is dropped without completing, the task never completes.
pub fn from_callback<I, T, E, F>(f: F) -> Box<dyn Task<I, T, E>>
where
    F: FnOnce(I, Done<T, E>) + Send + 'static,
    I: 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    Box::new(move |input: I| {
        let (done, rx) = Done::channel();
        f(input, done);
        wait_for(rx)
    })
}

/// Adapt an error-first callback function into a function usable with `map`
pub fn callback_fn<V, T, E, F>(f: F) -> impl Fn(V) -> TaskFuture<T, E>
where
    F: Fn(V, Done<T, E>),
    T: Send + 'static,
    E: Send + 'static,
{
    move |value: V| {
        let (done, rx) = Done::channel();
        f(value, done);
        wait_for(rx).boxed()
    }
}

async fn wait_for<T, E>(rx: oneshot::Receiver<Result<T, E>>) -> Result<T, E> {
    match rx.await {
        Ok(result) => result,
        Err(_) => {
            warn!("Task dropped its completion handle without completing; it will never finish");
            future::pending().await
        }
    }
}
