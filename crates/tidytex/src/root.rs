//! The root context: the bottom frame of every cleanup run.

use crate::Rule;
use statestack::{DefaultState, Prototype};

/// Get the `root` rule.
///
/// Outside the `document` environment nothing is rewritten: the root stores
/// every character it sees and recognizes commands anywhere.
pub fn prototype() -> Rule {
    Prototype::new("root", || Box::new(DefaultState))
        .with_followers(&["command"])
        .with_doc("The outermost parse context of a cleanup run.")
}
