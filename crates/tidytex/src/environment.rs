//! The `environment` state: the contents of a `\begin`/`\end` pair.

use crate::config::Config;
use crate::Frame;
use crate::Rule;
use statestack::{Ops, Prototype, State};

/// Passthrough context for an environment that is not on the ignore list.
///
/// The frame's key holds the braced environment name, seeded when the
/// `\begin` command replaced itself.
/// Content inside the environment is stored untouched; the frame pops once
/// a finished `\end` command for the same name folds back.
pub struct Environment;

impl State<Config, char, String> for Environment {
    fn fold(&mut self, _: &Config, child: &Frame, frame: &mut Frame, ops: &mut Ops) {
        frame.result.push_str(&child.result);
        if child.key == "end" && child.result.ends_with(frame.key.as_str()) {
            ops.pop();
        }
    }
}

/// Get the `environment` rule.
pub fn prototype() -> Rule {
    Prototype::new("environment", || Box::new(Environment))
        .with_followers(&["command"])
        .with_doc("The contents of a `\\begin{...} ... \\end{...}` pair.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_matching_end_command_closes_the_environment() {
        let config = Config::default();
        let mut state = Environment;
        let mut frame = Frame::new("environment", "environment");
        frame.key.push_str("{tabular}");
        frame.result.push_str("a & b");
        let mut child = Frame::new("command", "command");
        child.key.push_str("end");
        child.result.push_str("\\end{tabular}");
        let mut ops = Ops::default();

        state.fold(&config, &child, &mut frame, &mut ops);

        assert_eq!(frame.result, "a & b\\end{tabular}");
    }

    #[test]
    fn an_end_for_another_environment_is_just_stored() {
        let config = Config::default();
        let mut state = Environment;
        let mut frame = Frame::new("environment", "environment");
        frame.key.push_str("{tabular}");
        let mut child = Frame::new("command", "command");
        child.key.push_str("end");
        child.result.push_str("\\end{itemize}");

        state.fold(&config, &child, &mut frame, &mut Ops::default());

        assert_eq!(frame.result, "\\end{itemize}");
    }
}
