//! Post-order generation frontier.
//!
//! The frontier is a double-ended work queue driving a depth-first,
//! post-order schedule over the decomposition tree: every child of a node is
//! yielded for generation strictly before the node itself, so a module's
//! prompt can always embed its children's finalized interfaces.

use std::collections::VecDeque;

use crate::tree::index::ModuleIndex;
use crate::tree::ModuleTree;

/// One pending entry in the frontier.
#[derive(Debug)]
pub enum WorkItem {
    /// A module whose children still need to be expanded ahead of it.
    Expand {
        /// The module name.
        name: String,
        /// Its not-yet-expanded subtree.
        children: ModuleTree,
    },
    /// A module whose children have all been scheduled; next pop generates it.
    Ready {
        /// The module name.
        name: String,
    },
}

/// Ordered queue of pending work items.
pub struct Frontier {
    queue: VecDeque<WorkItem>,
}

impl Frontier {
    /// Seeds the frontier from the root's decomposition.
    ///
    /// Registers root → direct children (and each child → root) in the
    /// index, then enqueues one `Expand` entry per top-level child carrying
    /// its own subtree, followed by a `Ready` entry for the root itself so
    /// the root is generated last, after every descendant.
    #[must_use]
    pub fn seed(root: &str, tree: ModuleTree, index: &mut ModuleIndex) -> Self {
        index.register(root, &tree.names());
        let mut queue: VecDeque<WorkItem> = tree
            .into_entries()
            .into_iter()
            .map(|(name, children)| WorkItem::Expand { name, children })
            .collect();
        queue.push_back(WorkItem::Ready { name: root.to_string() });
        Self { queue }
    }

    /// Yields the next module that is ready to generate, expanding entries
    /// as needed and registering parent/child links in the index.
    ///
    /// Expansion pushes, at the front of the queue, the module's children
    /// (first child frontmost) ahead of a `Ready` entry for the module
    /// itself — the push discipline that makes the schedule post-order.
    /// Returns `None` once the queue is empty.
    pub fn next_ready(&mut self, index: &mut ModuleIndex) -> Option<String> {
        while let Some(item) = self.queue.pop_front() {
            match item {
                WorkItem::Ready { name } => return Some(name),
                WorkItem::Expand { name, children } => {
                    if children.is_empty() {
                        return Some(name);
                    }
                    index.register(&name, &children.names());
                    self.queue.push_front(WorkItem::Ready { name });
                    for (child, subtree) in children.into_entries().into_iter().rev() {
                        self.queue.push_front(WorkItem::Expand { name: child, children: subtree });
                    }
                }
            }
        }
        None
    }
}
