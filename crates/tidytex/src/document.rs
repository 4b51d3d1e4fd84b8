//! The `document` state: whitespace normalization in the document body.

use crate::config::Config;
use crate::Frame;
use crate::Rule;
use statestack::{Ops, Prototype, State};

/// Context for the body of the top-level `document` environment.
///
/// A single newline inside a paragraph is a soft line break and is rewritten
/// to a space; two or more consecutive newlines are a paragraph break and
/// are kept.
/// The frame pops once the `\end{document}` command folds back.
#[derive(Default)]
pub struct Document {
    newline_run: usize,
}

impl State<Config, char, String> for Document {
    fn consume(&mut self, _: &Config, chunk: &char, frame: &mut Frame) -> bool {
        if self.newline_run == 1 && *chunk != '\n' {
            // The newline was a soft line break: join the lines.
            frame.result.pop();
            frame.result.push(' ');
            self.newline_run = 0;
            return true;
        }
        if *chunk == '\n' {
            self.newline_run += 1;
        } else {
            self.newline_run = 0;
        }
        true
    }

    fn fold(&mut self, _: &Config, child: &Frame, frame: &mut Frame, ops: &mut Ops) {
        frame.result.push_str(&child.result);
        if frame.result.ends_with('\n') {
            self.newline_run += 1;
        }
        if child.key == "end" && child.result.ends_with("{document}") {
            ops.pop();
        }
    }
}

/// Get the `document` rule.
pub fn prototype() -> Rule {
    Prototype::new("document", || Box::<Document>::default())
        .with_followers(&["command"])
        .with_doc("The body of the top-level `document` environment.")
}
