//! Prompt builders for the generation protocol.
//!
//! Three fixed prompt shapes drive the whole run: the decomposition request,
//! the per-module target header, and the encapsulation requirement that
//! embeds the recorded interfaces of the module's children.

use std::fmt::Write as _;

use super::GenerateError;
use crate::config::{BEGIN_MARKER, END_MARKER, NO_IMPL_MARKER};
use crate::tree::index::ModuleIndex;

/// The decomposition request appended to the user's prompt at run start.
#[must_use]
pub fn decompose_request(root: &str) -> String {
    format!(
        "\nPlease provide all main modules of {root} using JSON (do not explicitly declare \
         'modules' or 'submodules'), organized in a hierarchical structure and without \
         including any registers, signals and comments.\n"
    )
}

/// The header naming the root design and target language, prepended to every
/// per-module prompt (but not to the decomposition request).
#[must_use]
pub fn target_header(root: &str, target: &str) -> String {
    format!("Create {root} in {target}:\n")
}

/// The per-module requirement: the recorded interfaces of every child,
/// followed by the fixed instruction asking for a marker-delimited interface
/// description and implementation.
///
/// # Errors
///
/// Returns [`GenerateError::MissingInterface`] if a child has no recorded
/// interface — the frontier guarantees children are generated first, so this
/// only fires on a scheduling bug.
pub fn encapsulate_request(
    module: &str,
    index: &ModuleIndex,
    target: &str,
) -> Result<String, GenerateError> {
    let mut intf = String::new();
    for child in index.children_of(module) {
        let lines = index.interface_of(child).ok_or_else(|| GenerateError::MissingInterface {
            module: module.to_string(),
            child: child.clone(),
        })?;
        intf.push_str(&lines.join("\n"));
        intf.push_str("\n\n");
    }

    let mut text = intf;
    let _ = write!(
        text,
        "\nPlease provide comments on the interface of {module} using unordered list of \
         markdown language. These comments should specify the bit-width of each interface \
         signal and must be enclosed within {BEGIN_MARKER} and {END_MARKER}. After that, \
         please provide a high-level implementation of the module {module} in {target} \
         (if the given implementation is incomplete, please comment with {NO_IMPL_MARKER}). \
         The {target} code of {module} must be enclosed within {BEGIN_MARKER} and \
         {END_MARKER}.\n"
    );
    Ok(text)
}
