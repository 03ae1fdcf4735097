mod aggregate;
mod map;
mod outcome;
mod parallel;
mod serial;
mod task;

pub use aggregate::Aggregator;
pub use map::map;
pub use outcome::Outcome;
pub use parallel::parallel;
pub use serial::serial;
pub use task::{
    callback_fn, from_callback, parallel_task, serial_task, Done, ParallelTask, SerialTask, Task,
    TaskFuture,
};
