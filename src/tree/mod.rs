//! Module decomposition tree.
//!
//! The decomposition response is a nested JSON mapping from module names to
//! sub-mappings; an empty sub-mapping is a leaf. Parsing validates the shape
//! once, up front, so traversal never has to deal with malformed input.

pub mod index;

use std::collections::HashSet;

use serde_json::Value;

/// Shape or parse failure in a decomposition response.
///
/// All variants are retryable at the decompose phase: the caller resends the
/// decomposition request until its retry budget runs out.
#[derive(Debug, thiserror::Error)]
pub enum DecompositionError {
    /// The response was not valid JSON at all.
    #[error("decomposition is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A subtree was something other than a JSON object.
    #[error("expected a JSON object for {module}")]
    NotAnObject {
        /// The module whose subtree had the wrong shape.
        module: String,
    },
    /// The top-level mapping does not contain the root module.
    #[error("decomposition does not contain the root module {root}")]
    MissingRoot {
        /// The requested root name.
        root: String,
    },
    /// A module name appears more than once anywhere in the tree, which
    /// would break the single-parent invariant.
    #[error("module {module} appears more than once in the decomposition")]
    DuplicateModule {
        /// The repeated name.
        module: String,
    },
}

/// An ordered mapping from child module names to their subtrees.
///
/// Order is the order the model listed the modules in, which is also the
/// order siblings are generated in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleTree {
    children: Vec<(String, ModuleTree)>,
}

impl ModuleTree {
    /// Parses a decomposition response for the given root module.
    ///
    /// The response must be a JSON object whose `root` key maps to the
    /// (possibly empty) tree of submodules. Every name in the tree must be
    /// unique, the root included.
    ///
    /// # Errors
    ///
    /// Returns a [`DecompositionError`] when the text is not JSON, the shape
    /// is not nested objects, the root key is missing, or a name repeats.
    pub fn parse_decomposition(root: &str, text: &str) -> Result<Self, DecompositionError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(top) = &value else {
            return Err(DecompositionError::NotAnObject { module: root.to_string() });
        };
        let subtree = top
            .get(root)
            .ok_or_else(|| DecompositionError::MissingRoot { root: root.to_string() })?;
        let tree = Self::from_value(root, subtree)?;

        let mut seen = HashSet::new();
        seen.insert(root.to_string());
        tree.check_duplicates(&mut seen)?;
        Ok(tree)
    }

    fn from_value(module: &str, value: &Value) -> Result<Self, DecompositionError> {
        let Value::Object(map) = value else {
            return Err(DecompositionError::NotAnObject { module: module.to_string() });
        };
        let mut children = Vec::with_capacity(map.len());
        for (name, sub) in map {
            children.push((name.clone(), Self::from_value(name, sub)?));
        }
        Ok(Self { children })
    }

    fn check_duplicates(&self, seen: &mut HashSet<String>) -> Result<(), DecompositionError> {
        for (name, sub) in &self.children {
            if !seen.insert(name.clone()) {
                return Err(DecompositionError::DuplicateModule { module: name.clone() });
            }
            sub.check_duplicates(seen)?;
        }
        Ok(())
    }

    /// `true` when this node has no submodules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Names of the direct children, in decomposition order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.children.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Consumes the node, yielding its `(name, subtree)` entries in order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(String, ModuleTree)> {
        self.children
    }

    /// Renders the whole tree (root included) as nested markdown bullets.
    #[must_use]
    pub fn to_markdown(&self, root: &str) -> String {
        let mut lines = vec![format!("- {root}")];
        self.push_markdown(&mut lines, 1);
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn push_markdown(&self, lines: &mut Vec<String>, indent: usize) {
        for (name, sub) in &self.children {
            lines.push(format!("{}- {name}", "  ".repeat(indent)));
            sub.push_markdown(lines, indent + 1);
        }
    }
}
