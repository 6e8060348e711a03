//! Artifact store — persistence for generated modules.
//!
//! All I/O goes through the `FileSystem` port so the store works identically
//! against the real disk and the in-memory fake used in tests. Layout under
//! the output root:
//!
//! ```text
//! <out>/
//!   ├── build/<target>/src/main/<root>/<module>[.scala]
//!   ├── doc/<root>.md            (decomposition tree, written at run start)
//!   └── doc/<root>/<module>.md   (per-module interface documents)
//! ```

use std::path::{Path, PathBuf};

use crate::config::GenConfig;
use crate::context::ServiceContext;
use crate::tree::ModuleTree;

/// Persists validated module bodies and interface documents.
pub struct ArtifactStore<'a> {
    ctx: &'a ServiceContext,
    out_dir: PathBuf,
    target: String,
}

impl<'a> ArtifactStore<'a> {
    /// Creates a store for the configured target and output root.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &GenConfig) -> Self {
        Self { ctx, out_dir: config.out_dir.clone(), target: config.target.clone() }
    }

    /// Prepares the workspace for a fresh run of `root`: deletes stale
    /// module sources and documents, then writes the decomposition tree as
    /// nested markdown bullets to `doc/<root>.md`.
    ///
    /// # Errors
    ///
    /// Returns an error if stale files cannot be deleted or the tree
    /// document cannot be written.
    pub fn initialize(&self, root: &str, tree: &ModuleTree) -> Result<(), String> {
        self.clear_dir(&self.source_dir(root))?;
        self.clear_dir(&self.doc_dir(root))?;
        let path = self.tree_doc_path(root);
        self.ctx
            .fs
            .write(&path, &tree.to_markdown(root))
            .map_err(|e| format!("Failed to write tree document {}: {e}", path.display()))
    }

    /// Writes a module's interface document to `doc/<root>/<module>.md`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_module_doc(
        &self,
        root: &str,
        module: &str,
        interface: &[String],
    ) -> Result<(), String> {
        let path = self.doc_dir(root).join(format!("{module}.md"));
        self.ctx
            .fs
            .write(&path, &join_lines(interface))
            .map_err(|e| format!("Failed to write doc for {module}: {e}"))
    }

    /// Writes a module's body to the source tree for the configured target.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_module_source(
        &self,
        root: &str,
        module: &str,
        body: &[String],
    ) -> Result<(), String> {
        let path = self.source_path(root, module);
        self.ctx
            .fs
            .write(&path, &join_lines(body))
            .map_err(|e| format!("Failed to write source for {module}: {e}"))
    }

    /// The source file path for a module; chisel sources get a `.scala`
    /// extension, other targets keep the bare module name.
    #[must_use]
    pub fn source_path(&self, root: &str, module: &str) -> PathBuf {
        let file = if self.target == "chisel" {
            format!("{module}.scala")
        } else {
            module.to_string()
        };
        self.source_dir(root).join(file)
    }

    fn source_dir(&self, root: &str) -> PathBuf {
        self.out_dir.join("build").join(&self.target).join("src").join("main").join(root)
    }

    fn doc_dir(&self, root: &str) -> PathBuf {
        self.out_dir.join("doc").join(root)
    }

    fn tree_doc_path(&self, root: &str) -> PathBuf {
        self.out_dir.join("doc").join(format!("{root}.md"))
    }

    fn clear_dir(&self, dir: &Path) -> Result<(), String> {
        if !self.ctx.fs.exists(dir) {
            return Ok(());
        }
        let entries =
            self.ctx.fs.list_dir(dir).map_err(|e| format!("Failed to list {}: {e}", dir.display()))?;
        for name in entries {
            let path = dir.join(&name);
            self.ctx
                .fs
                .remove_file(&path)
                .map_err(|e| format!("Failed to delete {}: {e}", path.display()))?;
        }
        Ok(())
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
