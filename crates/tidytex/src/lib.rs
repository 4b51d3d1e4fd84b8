//! # Tidytex: LaTeX cleanup rules.
//!
//! This crate contains the parser states that implement Tidytex's LaTeX
//! cleanup on top of the [statestack] engine: commands, their bracketed
//! parameters, environments, and the whitespace normalization applied to
//! the document body.
//! The [script] module runs a full cleanup over a source string; the
//! [config] module holds the keyed matchers the states consult.

pub mod command;
pub mod config;
pub mod document;
pub mod environment;
pub mod parameter;
pub mod root;
pub mod script;

use config::Config;

/// The engine instantiation used by every Tidytex rule: character chunks,
/// string results, and the configuration store as the context.
pub type Stack = statestack::StateStack<Config, char, String>;

/// A Tidytex state prototype.
pub type Rule = statestack::Prototype<Config, char, String>;

/// A Tidytex frame.
pub type Frame = statestack::Frame<String>;

/// All rules needed for a cleanup run, in registration order.
pub fn rules() -> Vec<Rule> {
    vec![
        root::prototype(),
        command::prototype(),
        parameter::prototype(),
        environment::prototype(),
        document::prototype(),
    ]
}
