//! Parent/child indices and recorded interfaces.
//!
//! After expansion the authoritative module relationships live here, not in
//! the original decomposition tree: parent → ordered children, child →
//! single parent, and the interface recorded for each generated module.

use std::collections::HashMap;

/// Arena of per-module state built up as the frontier expands.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    parents: HashMap<String, Vec<String>>,
    child_of: HashMap<String, String>,
    interfaces: HashMap<String, Vec<String>>,
}

impl ModuleIndex {
    /// Registers a parent with its ordered children.
    ///
    /// Duplicate names are rejected at decomposition parse time, so each
    /// child is registered under exactly one parent.
    pub fn register(&mut self, parent: &str, children: &[String]) {
        self.parents.insert(parent.to_string(), children.to_vec());
        for child in children {
            self.child_of.insert(child.clone(), parent.to_string());
        }
    }

    /// Ordered children of a module; empty for leaves and unknown names.
    #[must_use]
    pub fn children_of(&self, name: &str) -> &[String] {
        self.parents.get(name).map_or(&[], Vec::as_slice)
    }

    /// The single parent of a module, or `None` for the root.
    #[must_use]
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.child_of.get(name).map(String::as_str)
    }

    /// Records the validated interface of a generated module.
    pub fn record_interface(&mut self, name: &str, interface: Vec<String>) {
        self.interfaces.insert(name.to_string(), interface);
    }

    /// The recorded interface lines of a module, if it has been generated.
    #[must_use]
    pub fn interface_of(&self, name: &str) -> Option<&[String]> {
        self.interfaces.get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_links_both_directions() {
        let mut index = ModuleIndex::default();
        index.register("cpu", &["alu".to_string(), "decoder".to_string()]);

        assert_eq!(index.children_of("cpu"), ["alu", "decoder"]);
        assert_eq!(index.parent_of("alu"), Some("cpu"));
        assert_eq!(index.parent_of("decoder"), Some("cpu"));
        assert_eq!(index.parent_of("cpu"), None);
    }

    #[test]
    fn leaves_have_no_children() {
        let mut index = ModuleIndex::default();
        index.register("cpu", &["alu".to_string()]);
        assert!(index.children_of("alu").is_empty());
        assert!(index.children_of("unknown").is_empty());
    }

    #[test]
    fn interfaces_are_recorded_per_module() {
        let mut index = ModuleIndex::default();
        assert!(index.interface_of("alu").is_none());
        index.record_interface("alu", vec!["- a: input(1)".to_string()]);
        assert_eq!(index.interface_of("alu").unwrap(), ["- a: input(1)"]);
    }
}
