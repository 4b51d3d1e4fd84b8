//! Errors returned by the engine.

use std::fmt;

/// Error returned when driving an engine whose stack has no current state.
///
/// This indicates a protocol violation by the caller: the root context must
/// be pushed before the first chunk is delivered.
/// Note that [pop](crate::StateStack::pop) deliberately does *not* return
/// this error: trailing pops at end-of-stream are tolerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackEmptyError;

impl fmt::Display for StackEmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the state stack is empty")
    }
}

impl std::error::Error for StackEmptyError {}
