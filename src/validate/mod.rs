//! Completion validation.
//!
//! Extracts a structured interface and an implementation body from one
//! free-text completion. The scan is a single pass over the lines, phased by
//! the literal begin/end markers: the first marker pair delimits the
//! interface commentary, the second delimits the body. Everything here is
//! heuristic text scanning — there is no parser for the target language, so
//! the checks trade occasional false accepts and rejects for simplicity.

pub mod brackets;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{BEGIN_MARKER, END_MARKER, NO_IMPL_MARKER};

/// Inline single-backtick spans, rewritten to trailing-colon annotations.
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern must compile"));

/// A one-signal interface too terse to be useful to the parent module.
static TERSE_INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- (\w+): (\w+)\(([\w()]+)\)$").expect("terse pattern must compile"));

/// Comment of the shape `// <word> implementation here`.
static STUB_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^//\s+\w+\s+implementation\s+here$").expect("stub pattern must compile")
});

/// The validated sections extracted from one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedModule {
    /// Interface lines: a generated signal-count header followed by the
    /// annotated signal descriptions.
    pub interface: Vec<String>,
    /// Implementation body lines, verbatim.
    pub body: Vec<String>,
}

/// Why a completion was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The interface section did not produce a `- `-prefixed signal list.
    #[error("the interface of {module} is not well-formed")]
    MalformedInterface {
        /// The module being validated.
        module: String,
    },
    /// The interface is a single terse signal entry, too brief to be useful.
    #[error("the description of interface for {module} is too brief")]
    TerseInterface {
        /// The module being validated.
        module: String,
    },
    /// The body contains an unimplemented marker or lacks the target idiom.
    #[error("incomplete implementation of {module}")]
    Incomplete {
        /// The module being validated.
        module: String,
    },
    /// The body failed the bracket balance check.
    #[error("the module {module} is not well-formed")]
    Unbalanced {
        /// The module being validated.
        module: String,
    },
    /// The marker-delimited sections never opened or never closed in order.
    #[error("completion for {module} is missing delimited sections")]
    MissingSections {
        /// The module being validated.
        module: String,
    },
}

/// Scan phase: before the interface closes, or inside the body.
enum Phase {
    Interface,
    Body,
}

/// Token whose absence from the body marks an incomplete rendition of the
/// target language. Only chisel carries one.
fn required_token(target: &str) -> Option<&'static str> {
    match target {
        "chisel" => Some("class"),
        _ => None,
    }
}

/// `true` for lines that flag an unimplemented or stubbed-out region.
fn is_unimplemented(line: &str) -> bool {
    line.contains("...")
        || line.contains("logic here")
        || line.contains("goes here")
        || line.contains("TODO")
        || line.contains(NO_IMPL_MARKER)
        || STUB_COMMENT.is_match(line)
}

/// Validates one completion for `module`, extracting interface and body.
///
/// The contract is accept-or-reject: on success both sections are non-empty
/// and structurally sane; any deviation — sections out of order, a terse or
/// malformed interface, an unimplemented marker, an unbalanced body —
/// rejects the whole completion and the caller resends the request.
///
/// # Errors
///
/// Returns the [`Rejection`] describing the first problem found.
pub fn check_module(
    module: &str,
    target: &str,
    text: &str,
) -> Result<ExtractedModule, Rejection> {
    let target_lower = target.to_lowercase();
    let mut buf: Vec<&str> = Vec::new();
    let mut in_section = false;
    let mut phase = Phase::Interface;
    let mut interface: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.starts_with(BEGIN_MARKER) {
            in_section = true;
            continue;
        }
        if line.starts_with(END_MARKER) {
            match phase {
                Phase::Interface => {
                    interface = close_interface(module, &buf)?;
                    phase = Phase::Body;
                    in_section = false;
                    buf.clear();
                    continue;
                }
                Phase::Body => {
                    let body_text = buf.join("\n");
                    if let Some(token) = required_token(target) {
                        if !body_text.contains(token) {
                            return Err(Rejection::Incomplete { module: module.to_string() });
                        }
                    }
                    if !brackets::is_balanced(&body_text) {
                        return Err(Rejection::Unbalanced { module: module.to_string() });
                    }
                    let body =
                        body_text.trim().split('\n').map(str::to_string).collect::<Vec<_>>();
                    return Ok(ExtractedModule { interface, body });
                }
            }
        }

        let in_interface = matches!(phase, Phase::Interface);
        if (in_interface && (line.contains(module) || line.is_empty()))
            || line.starts_with("```")
            || line.to_lowercase().starts_with(&target_lower)
            || !in_section
        {
            continue;
        }
        if is_unimplemented(line) {
            return Err(Rejection::Incomplete { module: module.to_string() });
        }
        buf.push(line);
    }

    Err(Rejection::MissingSections { module: module.to_string() })
}

/// Finishes the interface phase: rewrites backtick spans to `name: `
/// annotations, checks the well-formedness rules, and prepends the
/// signal-count header.
fn close_interface(module: &str, buf: &[&str]) -> Result<Vec<String>, Rejection> {
    let joined = buf.join("\n");
    let rewritten = INLINE_CODE.replace_all(&joined, "${1}: ");
    let lines: Vec<String> = rewritten.trim().split('\n').map(str::to_string).collect();

    let first = lines.first().map_or("", |l| l.trim());
    if !first.starts_with("- ") {
        return Err(Rejection::MalformedInterface { module: module.to_string() });
    }
    if TERSE_INTERFACE.is_match(first) {
        return Err(Rejection::TerseInterface { module: module.to_string() });
    }

    let mut interface = Vec::with_capacity(lines.len() + 1);
    interface.push(format!(
        "The interface of {module} should contain {} signals, as follows:",
        lines.len()
    ));
    interface.extend(lines);
    Ok(interface)
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: &str = "####[BEGIN]####";
    const E: &str = "####[END]####";

    fn completion(interface: &[&str], body: &[&str]) -> String {
        let mut text = String::new();
        text.push_str("Some preamble the model wrote.\n");
        text.push_str(M);
        text.push('\n');
        for line in interface {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(E);
        text.push('\n');
        text.push_str(M);
        text.push('\n');
        for line in body {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(E);
        text.push('\n');
        text
    }

    fn chisel_body() -> Vec<&'static str> {
        vec![
            "class Alu extends Module {",
            "  val io = IO(new Bundle {})",
            "}",
        ]
    }

    #[test]
    fn extracts_interface_and_body() {
        let text = completion(
            &["- `a` 8-bit operand input", "- `b` carry chain output"],
            &chisel_body(),
        );
        let extracted = check_module("alu", "chisel", &text).unwrap();
        assert_eq!(
            extracted.interface,
            [
                "The interface of alu should contain 2 signals, as follows:",
                "- a:  8-bit operand input",
                "- b:  carry chain output",
            ]
        );
        assert_eq!(extracted.body, chisel_body());
    }

    #[test]
    fn interface_round_trip_counts_and_annotates_signals() {
        let text = completion(&["- `a`", "- `b(c)`"], &chisel_body());
        let extracted = check_module("alu", "chisel", &text).unwrap();
        assert_eq!(
            extracted.interface[0],
            "The interface of alu should contain 2 signals, as follows:"
        );
        assert_eq!(extracted.interface[1], "- a: ");
        // The trailing space of the last line falls to the outer trim.
        assert_eq!(extracted.interface[2], "- b(c):");
        assert_eq!(extracted.body, chisel_body());
    }

    #[test]
    fn backtick_spans_become_colon_annotations() {
        let text = completion(&["- `clk` main clock, 1 bit wide"], &chisel_body());
        let extracted = check_module("alu", "chisel", &text).unwrap();
        assert_eq!(extracted.interface[0], "The interface of alu should contain 1 signals, as follows:");
        assert_eq!(extracted.interface[1], "- clk:  main clock, 1 bit wide");
    }

    #[test]
    fn rejects_terse_single_signal_interface() {
        let text = completion(&["- clk: input(1)"], &chisel_body());
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::TerseInterface { module: "alu".into() });
    }

    #[test]
    fn rejects_interface_without_bullet_list() {
        let text = completion(&["The signals are clk and rst."], &chisel_body());
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::MalformedInterface { module: "alu".into() });
    }

    #[test]
    fn skips_blanks_fences_and_module_mentions_in_interface() {
        let text = completion(
            &[
                "```",
                "",
                "The alu has the following ports:",
                "chisel signals below",
                "- `x`: 4-bit input",
                "- `y`: 4-bit output",
                "```",
            ],
            &chisel_body(),
        );
        let extracted = check_module("alu", "chisel", &text).unwrap();
        assert_eq!(extracted.interface[0], "The interface of alu should contain 2 signals, as follows:");
        assert_eq!(extracted.interface.len(), 3);
    }

    #[test]
    fn rejects_ellipsis_in_body() {
        let text = completion(&["- `a`: 1-bit input"], &["class Alu {", "  ...", "}"]);
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::Incomplete { module: "alu".into() });
    }

    #[test]
    fn rejects_todo_in_body() {
        let text = completion(
            &["- `a`: 1-bit input"],
            &["class Alu {", "  // TODO wire up the adder", "}"],
        );
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::Incomplete { module: "alu".into() });
    }

    #[test]
    fn rejects_logic_here_and_goes_here() {
        for stub in ["  // adder logic here", "  // the rest goes here"] {
            let text = completion(&["- `a`: 1-bit input"], &["class Alu {", stub, "}"]);
            let err = check_module("alu", "chisel", &text).unwrap_err();
            assert_eq!(err, Rejection::Incomplete { module: "alu".into() });
        }
    }

    #[test]
    fn rejects_no_impl_marker_in_body() {
        let text = completion(
            &["- `a`: 1-bit input"],
            &["class Alu {", "####[NO IMPLEMENTATION]####", "}"],
        );
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::Incomplete { module: "alu".into() });
    }

    #[test]
    fn rejects_stub_comment_regardless_of_balance() {
        let text = completion(
            &["- `a`: 1-bit input"],
            &["// adder implementation here"],
        );
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::Incomplete { module: "alu".into() });
    }

    #[test]
    fn rejects_unbalanced_body() {
        let text = completion(
            &["- `a`: 1-bit input"],
            &["class Alu extends Module {", "  val io = IO(new Bundle {}", "}"],
        );
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::Unbalanced { module: "alu".into() });
    }

    #[test]
    fn chisel_body_without_class_is_incomplete() {
        let text = completion(&["- `a`: 1-bit input"], &["object Alu {", "}"]);
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::Incomplete { module: "alu".into() });
    }

    #[test]
    fn non_chisel_target_needs_no_idiom_token() {
        let text = completion(&["- `a`: 1-bit input"], &["module alu;", "endmodule"]);
        let extracted = check_module("alu", "verilog", &text).unwrap();
        assert_eq!(extracted.body, ["module alu;", "endmodule"]);
    }

    #[test]
    fn rejects_when_body_never_closes() {
        let mut text = completion(&["- `a`: 1-bit input"], &[]);
        // Drop the final end marker so the body section stays open.
        text.truncate(text.rfind(E).unwrap());
        text.push_str("class Alu {}\n");
        let err = check_module("alu", "chisel", &text).unwrap_err();
        assert_eq!(err, Rejection::MissingSections { module: "alu".into() });
    }

    #[test]
    fn rejects_when_markers_never_open() {
        let err = check_module("alu", "chisel", "class Alu {}\n").unwrap_err();
        assert_eq!(err, Rejection::MissingSections { module: "alu".into() });
    }

    #[test]
    fn text_before_first_marker_is_ignored() {
        let text = completion(&["- `a`: 1-bit input"], &chisel_body());
        let noisy = format!("TODO list for later\n{text}");
        // The TODO line sits before the first begin marker, so it is skipped
        // rather than rejected.
        let extracted = check_module("alu", "chisel", &noisy).unwrap();
        assert_eq!(extracted.body, chisel_body());
    }
}
