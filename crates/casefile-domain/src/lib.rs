//! Casefile Domain Layer
//!
//! This crate contains the core domain model for Casefile. It has no external
//! dependencies and defines the concepts and trait interfaces the other
//! layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Unit**: one fixed-width chunk or one delimited page, sent in one request
//! - **Worker**: one of two tasks, each bound to one credential
//! - **Partition**: the static even/odd split of units between the workers
//! - **LlmProvider**: the boundary to the remote chat-completion API

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod partition;
pub mod traits;
pub mod unit;

// Re-exports for convenience
pub use partition::{Partition, WorkerId};
pub use traits::LlmProvider;
pub use unit::{Unit, UnitKind, CHARS_PER_ESTIMATED_PAGE};
