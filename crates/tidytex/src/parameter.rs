//! The `parameter` state, which reads one bracket-delimited argument.

use crate::config::Config;
use crate::Frame;
use crate::Rule;
use statestack::{Prototype, State};

/// State for a `{...}` or `[...]` argument following a command.
///
/// The opening bracket becomes the frame's key and the frame completes on
/// the matching closing bracket.
/// Commands are recognized inside the argument.
pub struct Parameter;

impl State<Config, char, String> for Parameter {
    fn consume(&mut self, _: &Config, chunk: &char, frame: &mut Frame) -> bool {
        match frame.key.chars().next() {
            None => frame.key.push(*chunk),
            Some(open) => {
                if closing(open) == Some(*chunk) {
                    frame.done = true;
                }
            }
        }
        true
    }
}

/// The closing bracket for each recognized opening bracket.
fn closing(open: char) -> Option<char> {
    match open {
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

fn cond(_: &Config, chunk: &char, current: &Frame) -> bool {
    // Only a command that has read a name takes arguments.
    !current.key.is_empty() && closing(*chunk).is_some()
}

/// Get the `parameter` rule.
pub fn prototype() -> Rule {
    Prototype::new("parameter", || Box::new(Parameter))
        .with_followers(&["command"])
        .with_cond(cond)
        .with_doc("A bracket-delimited argument of a command.")
}
