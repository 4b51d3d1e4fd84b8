//! The keyed configuration store consulted by the grammar states.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Key under which the control-sequence-name pattern is stored.
pub const COMMAND: &str = "command";

/// Key under which the transparent-environments list is stored.
pub const IGNORED_ENV: &str = "ignored_env";

/// A single configuration entry.
#[derive(Debug)]
pub enum Matcher {
    /// Matches values accepted by the regular expression.
    Pattern(Regex),
    /// Matches values equal to one of the listed strings.
    OneOf(Vec<String>),
}

/// The keyed matcher consulted by grammar states.
///
/// ```
/// # use tidytex::config::{Config, COMMAND, IGNORED_ENV};
/// let config = Config::default();
/// assert_eq!(config.matches(COMMAND, "a"), Ok(true));
/// assert_eq!(config.matches(IGNORED_ENV, "blockquote"), Ok(true));
/// assert!(config.matches("no-such-key", "a").is_err());
/// ```
#[derive(Debug)]
pub struct Config {
    entries: HashMap<String, Matcher>,
}

impl Default for Config {
    fn default() -> Config {
        let mut entries = HashMap::new();
        entries.insert(
            COMMAND.to_string(),
            // Characters that may extend a control sequence name.
            Matcher::Pattern(Regex::new(r"[\w@]").expect("the built-in pattern is valid")),
        );
        entries.insert(
            IGNORED_ENV.to_string(),
            Matcher::OneOf(vec!["blockquote".to_string(), "annotation".to_string()]),
        );
        Config { entries }
    }
}

impl Config {
    /// Test `value` against the matcher registered under `key`.
    pub fn matches(&self, key: &str, value: &str) -> Result<bool, UnknownKeyError> {
        match self.entries.get(key) {
            None => Err(UnknownKeyError {
                key: key.to_string(),
            }),
            Some(Matcher::Pattern(pattern)) => Ok(pattern.is_match(value)),
            Some(Matcher::OneOf(values)) => Ok(values.iter().any(|v| v == value)),
        }
    }

    /// Add or replace the entry under `key`.
    pub fn insert<K: Into<String>>(&mut self, key: K, matcher: Matcher) {
        self.entries.insert(key.into(), matcher);
    }
}

/// Error returned by [Config::matches] for a key with no registered entry.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownKeyError {
    pub key: String,
}

impl fmt::Display for UnknownKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown configuration key '{}'", self.key)
    }
}

impl std::error::Error for UnknownKeyError {}

/// The on-disk form of a configuration file.
///
/// Both fields are optional; a missing field keeps the built-in default.
///
/// ```json
/// {
///     "command": "[a-zA-Z@]",
///     "ignored_env": ["blockquote", "lstlisting"]
/// }
/// ```
#[derive(Debug, Default, serde::Deserialize)]
pub struct File {
    /// Overrides the pattern for characters that may extend a command name.
    pub command: Option<String>,

    /// Overrides the list of environments treated as transparent.
    pub ignored_env: Option<Vec<String>>,
}

impl File {
    /// Build a [Config] by applying this file's overrides to the defaults.
    pub fn into_config(self) -> Result<Config, regex::Error> {
        let mut config = Config::default();
        if let Some(pattern) = self.command {
            config.insert(COMMAND, Matcher::Pattern(Regex::new(&pattern)?));
        }
        if let Some(environments) = self.ignored_env {
            config.insert(IGNORED_ENV, Matcher::OneOf(environments));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_command_pattern() {
        let config = Config::default();

        assert_eq!(config.matches(COMMAND, "a"), Ok(true));
        assert_eq!(config.matches(COMMAND, "@"), Ok(true));
        assert_eq!(config.matches(COMMAND, "7"), Ok(true));
        assert_eq!(config.matches(COMMAND, "{"), Ok(false));
        assert_eq!(config.matches(COMMAND, " "), Ok(false));
        assert_eq!(config.matches(COMMAND, "\\"), Ok(false));
    }

    #[test]
    fn default_ignored_environments() {
        let config = Config::default();

        assert_eq!(config.matches(IGNORED_ENV, "blockquote"), Ok(true));
        assert_eq!(config.matches(IGNORED_ENV, "annotation"), Ok(true));
        assert_eq!(config.matches(IGNORED_ENV, "tabular"), Ok(false));
    }

    #[test]
    fn unknown_key() {
        let config = Config::default();

        assert_eq!(
            config.matches("nope", "a"),
            Err(UnknownKeyError { key: "nope".into() })
        );
    }

    #[test]
    fn insert_replaces_an_entry() {
        let mut config = Config::default();
        config.insert(IGNORED_ENV, Matcher::OneOf(vec!["tabular".to_string()]));

        assert_eq!(config.matches(IGNORED_ENV, "tabular"), Ok(true));
        assert_eq!(config.matches(IGNORED_ENV, "blockquote"), Ok(false));
    }

    #[test]
    fn empty_file_keeps_the_defaults() {
        let file: File = serde_json::from_str("{}").unwrap();
        let config = file.into_config().unwrap();

        assert_eq!(config.matches(COMMAND, "a"), Ok(true));
        assert_eq!(config.matches(IGNORED_ENV, "blockquote"), Ok(true));
    }

    #[test]
    fn file_overrides() {
        let file: File = serde_json::from_str(
            r#"{"command": "[a-z]", "ignored_env": ["lstlisting"]}"#,
        )
        .unwrap();
        let config = file.into_config().unwrap();

        assert_eq!(config.matches(COMMAND, "a"), Ok(true));
        assert_eq!(config.matches(COMMAND, "A"), Ok(false));
        assert_eq!(config.matches(IGNORED_ENV, "lstlisting"), Ok(true));
        assert_eq!(config.matches(IGNORED_ENV, "blockquote"), Ok(false));
    }

    #[test]
    fn file_with_an_invalid_pattern_fails() {
        let file = File {
            command: Some("[".to_string()),
            ignored_env: None,
        };

        assert!(file.into_config().is_err());
    }
}
