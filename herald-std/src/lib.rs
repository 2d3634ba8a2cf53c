//! # herald-std
//!
//! Standard implementations for the Herald event emitter.
//!
//! This crate provides:
//! - **Topics**: [`Topic`], the priority-ordered listener registry for one pattern
//! - **Emitter**: [`MemoryEmitter`] and its [`MemoryEmitterBuilder`]
//! - **Async results**: [`ErrorStream`]
//! - **Worker pool**: [`TokioPool`]
//! - **Defaults**: id generation and panic logging in [`defaults`]
//! - **Testing helpers**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use herald_core;

// Modules
pub mod defaults;
pub mod memory;
pub mod pool;
pub mod stream;
pub mod testing;
pub mod topic;

pub use memory::{MemoryEmitter, MemoryEmitterBuilder};
pub use pool::TokioPool;
pub use stream::ErrorStream;
pub use topic::Topic;
