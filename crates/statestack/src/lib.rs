//! # Statestack: a stack-of-states streaming parser engine.
//!
//! This crate implements a small state machine for parsing a stream of
//! chunks (conventionally single characters) one at a time.
//! Parse contexts are represented as named states living on a stack:
//! each state accumulates its own result, decides which child states may
//! activate beneath it, and folds a finished child's output back into its
//! own when the child completes.
//!
//! The engine is deliberately resumable: it is driven one chunk per call,
//! so an in-progress child state simply means "waiting for more input
//! before this construct can close".
//! An ordinary recursive-descent parser cannot do this: its parsing
//! contexts live on the call stack and cannot be suspended between
//! characters. That is the reason the stack is external.
//!
//! See [StateStack] for a worked example.

pub mod error;
pub mod registry;
pub mod stack;
pub mod state;

pub use error::StackEmptyError;
pub use registry::{BuildFn, CondFn, Prototype, Registry};
pub use stack::{Ops, StateStack};
pub use state::{DefaultState, Frame, Sequence, State};
