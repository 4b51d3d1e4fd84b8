//! The `command` state, which reads one control sequence.

use crate::config;
use crate::config::Config;
use crate::Frame;
use crate::Rule;
use statestack::{Ops, Prototype, State};

/// State for a control sequence such as `\begin` or `\alpha`.
///
/// The command name accumulates in the frame's key while characters match
/// the `command` configuration pattern; the first character that cannot
/// extend the name is stored and completes the frame.
/// When the brace parameter of a `\begin` or `\end` folds back, the command
/// replaces its own frame with whatever context the named environment calls
/// for.
pub struct Command;

impl State<Config, char, String> for Command {
    fn consume(&mut self, config: &Config, chunk: &char, frame: &mut Frame) -> bool {
        if frame.key.is_empty() && *chunk == '\\' {
            return true;
        }
        let mut buffer = [0; 4];
        if config
            .matches(config::COMMAND, chunk.encode_utf8(&mut buffer))
            .unwrap_or(false)
        {
            frame.key.push(*chunk);
            return true;
        }
        // TODO: recognize control symbols like \\ and \% whose name is a
        // single non-letter character.
        frame.done = true;
        true
    }

    fn fold(&mut self, config: &Config, child: &Frame, frame: &mut Frame, ops: &mut Ops) {
        frame.result.push_str(&child.result);
        if child.key != "{" {
            return;
        }
        if frame.key == "begin" {
            // The environment is now known: replace this frame with the
            // context it calls for. Ignored environments get none, so their
            // contents stay with the enclosing context.
            ops.pop();
            let name = child.result.trim_start_matches('{').trim_end_matches('}');
            if name == "document" {
                ops.push_keyed("document", child.result.as_str());
            } else if !config.matches(config::IGNORED_ENV, name).unwrap_or(false) {
                ops.push_keyed("environment", child.result.as_str());
            }
        } else if frame.key == "end" {
            // Pop so the enclosing context sees the finished \end.
            ops.pop();
        }
    }
}

fn cond(_: &Config, chunk: &char, _: &Frame) -> bool {
    *chunk == '\\'
}

/// Get the `command` rule.
pub fn prototype() -> Rule {
    Prototype::new("command", || Box::new(Command))
        .with_followers(&["parameter"])
        .with_cond(cond)
        .with_doc("A control sequence such as `\\begin` or `\\alpha`.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(state: &mut Command, config: &Config, frame: &mut Frame, input: &str) {
        for c in input.chars() {
            if state.consume(config, &c, frame) {
                frame.result.push(c);
            }
        }
    }

    #[test]
    fn cond_fires_on_a_backslash() {
        let config = Config::default();
        let frame = Frame::new("root", "root");

        assert!(cond(&config, &'\\', &frame));
        assert!(!cond(&config, &'a', &frame));
    }

    #[test]
    fn the_name_accumulates_in_the_key() {
        let config = Config::default();
        let mut state = Command;
        let mut frame = Frame::new("command", "command");

        feed(&mut state, &config, &mut frame, "\\alpha");

        assert_eq!(frame.key, "alpha");
        assert_eq!(frame.result, "\\alpha");
        assert!(!frame.done);
    }

    #[test]
    fn a_non_name_character_completes_the_command() {
        let config = Config::default();
        let mut state = Command;
        let mut frame = Frame::new("command", "command");

        feed(&mut state, &config, &mut frame, "\\alpha ");

        assert_eq!(frame.key, "alpha");
        assert_eq!(frame.result, "\\alpha ");
        assert!(frame.done);
    }

    #[test]
    fn fold_appends_a_parameter() {
        let config = Config::default();
        let mut state = Command;
        let mut frame = Frame::new("command", "command");
        frame.key.push_str("frac");
        frame.result.push_str("\\frac");
        let mut child = Frame::new("parameter", "parameter");
        child.key.push('{');
        child.result.push_str("{a}");

        state.fold(&config, &child, &mut frame, &mut Ops::default());

        assert_eq!(frame.result, "\\frac{a}");
    }
}
