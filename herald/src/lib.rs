//! # herald - In-Process Event Emitter
//!
//! `herald` dispatches named events to listeners registered against topic
//! patterns. Patterns are dot-separated; `*` matches one segment and `**`
//! matches any number of segments. Listeners under one pattern run in
//! priority order, highest first.
//!
//! ## Quick Start
//!
//! ```rust
//! use herald::prelude::*;
//!
//! let emitter = MemoryEmitter::<String>::new();
//! emitter
//!     .on_with_priority("order.*", |event| {
//!         assert_eq!(event.topic(), "order.created");
//!         Ok(())
//!     }, Priority::HIGH)
//!     .unwrap();
//!
//! let errors = emitter.emit_sync("order.created", "A-1".to_string());
//! assert!(errors.is_empty());
//! ```
//!
//! ## Asynchronous emission
//!
//! [`Emitter::emit`] returns immediately with an [`ErrorStream`]. The
//! dispatch pass runs on the configured [`Pool`], or on a freshly spawned
//! task, and the stream ends when the pass completes.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Errors
    BoxError,
    // Emitter contract
    Emitter,
    EmitterError,
    // Handlers
    ErrorHandler,
    // Event
    Event,
    IdGenerator,
    // Listener
    Listener,
    ListenerOptions,
    // Message
    Message,
    PanicHandler,
    PanicPayload,
    // Pool
    Pool,
    Priority,
    Task,
    panic_message,
};

pub use herald_std::{ErrorStream, MemoryEmitter, MemoryEmitterBuilder, TokioPool, Topic};

/// Topic pattern matching.
pub mod pattern {
    pub use herald_core::pattern::{
        MULTI_WILDCARD, SINGLE_WILDCARD, is_valid_topic_name, matches,
    };
}

/// Default collaborators.
pub mod defaults {
    pub use herald_std::defaults::{
        DEFAULT_ERROR_BUFFER_SIZE, MAX_ERROR_BUFFER_SIZE, error_handler, id_generator,
        panic_handler, unique_id,
    };
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use herald_std::testing::*;
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Emitter, EmitterError, ErrorHandler, ErrorStream, Event, IdGenerator,
        ListenerOptions, MemoryEmitter, PanicHandler, Pool, Priority, TokioPool,
    };
}

#[doc(hidden)]
pub use futures;
