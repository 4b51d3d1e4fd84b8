//! Running a full cleanup over a source string.

use crate::config::Config;
use crate::Stack;
use statestack::StackEmptyError;

/// Clean `source` and return the normalized text.
///
/// Registers every rule, pushes the root context, and feeds the source one
/// character at a time.
/// Input that ends inside an unfinished construct leaves frames on the
/// stack; they are folded down into the root so the run still produces
/// best-effort output.
pub fn clean(config: Config, source: &str) -> Result<String, StackEmptyError> {
    let mut stack = Stack::new(config);
    for rule in crate::rules() {
        stack.register(rule);
    }
    stack.push("root");
    for c in source.chars() {
        stack.advance(c)?;
    }
    while stack.len() > 1 {
        stack.pop();
    }
    Ok(stack.pop().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    macro_rules! clean_test {
        ($name: ident, $input: expr, $want: expr) => {
            #[test]
            fn $name() {
                let got = clean(Config::default(), $input).unwrap();
                let want = $want.to_string();

                if got != want {
                    println!("Output is different:");
                    println!("------[got]-------");
                    println!("{}", got);
                    println!("------[want]------");
                    println!("{}", want);
                    println!("-----------------");
                    panic!("clean test failed");
                }
            }
        };
    }

    clean_test!(plain_text, "hello world", "hello world");
    clean_test!(
        newlines_outside_the_document_are_kept,
        "line one\nline two\n",
        "line one\nline two\n"
    );
    clean_test!(bare_command, "x \\alpha y", "x \\alpha y");
    clean_test!(
        command_with_two_parameters,
        "\\frac{a}{b} z",
        "\\frac{a}{b} z"
    );
    clean_test!(
        square_bracket_parameter,
        "\\documentclass[12pt]{article}\n",
        "\\documentclass[12pt]{article}\n"
    );
    clean_test!(
        document_joins_wrapped_lines,
        "\\begin{document}one\ntwo\\end{document}",
        "\\begin{document}one two\\end{document}"
    );
    clean_test!(
        document_keeps_paragraph_breaks,
        "\\begin{document}one\n\ntwo\\end{document}",
        "\\begin{document}one\n\ntwo\\end{document}"
    );
    clean_test!(
        text_after_the_document_is_untouched,
        "\\begin{document}a\nb\\end{document}\nc\nd",
        "\\begin{document}a b\\end{document}\nc\nd"
    );
    clean_test!(
        an_environment_protects_its_contents,
        "\\begin{document}\\begin{tabular}q\nr\\end{tabular}\\end{document}",
        "\\begin{document}\\begin{tabular}q\nr\\end{tabular}\\end{document}"
    );
    clean_test!(
        an_ignored_environment_is_transparent,
        "\\begin{document}\\begin{blockquote}q\nr\\end{blockquote}\\end{document}",
        "\\begin{document}\\begin{blockquote}q r\\end{blockquote}\\end{document}"
    );
    clean_test!(
        environments_nest,
        "\\begin{document}\\begin{figure}\\begin{tabular}a\nb\\end{tabular}\\end{figure}c\nd\\end{document}",
        "\\begin{document}\\begin{figure}\\begin{tabular}a\nb\\end{tabular}\\end{figure}c d\\end{document}"
    );
    clean_test!(
        unterminated_input_still_completes,
        "\\begin{document}a\nb",
        "\\begin{document}a b"
    );
    clean_test!(empty_input, "", "");

    #[test]
    fn a_custom_ignore_list_is_honored() {
        let file: config::File =
            serde_json::from_str(r#"{"ignored_env": ["tabular"]}"#).unwrap();
        let config = file.into_config().unwrap();
        let input = "\\begin{document}\\begin{tabular}q\nr\\end{tabular}\\end{document}";

        assert_eq!(
            clean(config, input).unwrap(),
            "\\begin{document}\\begin{tabular}q r\\end{tabular}\\end{document}"
        );
    }
}
