//! # herald-core
//!
//! Core types and traits for the Herald event emitter.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that registers listeners or plugs in collaborators (pools, handlers)
//! without pulling in the full `herald-std` implementation.
//!
//! # Building Blocks
//!
//! ## Events ([`Event`])
//!
//! One event is created per emission and shared by reference with every
//! listener that runs for it. Listeners may rewrite the payload or set the
//! abort flag; later listeners of the same emission observe the change.
//!
//! ## Listeners ([`Listener`], [`Priority`], [`ListenerOptions`])
//!
//! Listeners are plain closures. Each one is registered under a topic
//! pattern with a priority; higher priorities run first.
//!
//! ## Topic patterns ([`pattern`])
//!
//! Patterns are dot-separated. `*` matches exactly one segment and `**`
//! matches zero or more segments.
//!
//! ## Collaborators ([`Pool`], [`ErrorHandler`], [`PanicHandler`], [`IdGenerator`])
//!
//! Swappable pieces an [`Emitter`] consults during registration and
//! dispatch.
//!
//! # Error Types
//!
//! - [`EmitterError`] - every failure surfaced by an emitter
//! - [`BoxError`] - what listener callbacks return

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod emitter;
mod error;
mod event;
mod handler;
mod listener;
mod message;
pub mod pattern;
mod pool;
mod priority;

// Re-exports
pub use emitter::Emitter;
pub use error::{BoxError, EmitterError};
pub use event::Event;
pub use handler::{ErrorHandler, IdGenerator, PanicHandler, PanicPayload, panic_message};
pub use listener::{Listener, ListenerOptions};
pub use message::Message;
pub use pool::{Pool, Task};
pub use priority::Priority;
