//! Message trait for payload types.

/// A marker trait for event payloads.
///
/// Payloads travel between threads when an emission runs asynchronously, so
/// they must be `Send + Sync + 'static`. Every such type is a `Message`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct OrderCreated { id: u64 }
///
/// let emitter = MemoryEmitter::<OrderCreated>::new();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Event payloads must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}
