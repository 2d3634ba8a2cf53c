//! Worker pool capability used for asynchronous emission.

/// A unit of work submitted to a [`Pool`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A bounded set of workers that runs asynchronous dispatch passes.
///
/// When an emitter has no pool, each asynchronous emission gets its own
/// freshly spawned task instead.
pub trait Pool: Send + Sync + 'static {
    /// Enqueues a task for execution.
    fn submit(&self, task: Task);

    /// The number of tasks currently executing.
    fn running(&self) -> usize;

    /// Stops accepting tasks and blocks until the accepted ones finish.
    ///
    /// Tasks submitted afterwards are dropped without running.
    fn release(&self);

    /// Reports whether [`release`](Self::release) has been called.
    fn is_released(&self) -> bool;
}
