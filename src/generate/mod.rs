//! Generation pipeline and per-module retry protocol.
//!
//! One run: decompose the root into a module tree (with retry), initialize
//! the artifact store, then drive the frontier — for each ready module,
//! build a prompt from its children's recorded interfaces, request a
//! completion, validate it, and persist the result. Validation rejections
//! and transport failures resend the identical request until the retry
//! budget runs out, at which point the whole run aborts; persistence
//! failures abort immediately.

pub mod prompt;

use crate::config::GenConfig;
use crate::context::ServiceContext;
use crate::frontier::Frontier;
use crate::ports::llm::CompletionRequest;
use crate::store::ArtifactStore;
use crate::tree::index::ModuleIndex;
use crate::tree::ModuleTree;
use crate::validate::{self, ExtractedModule};

/// Fatal pipeline failures. Everything here terminates the run; retryable
/// conditions are handled inside the pipeline and only surface once a retry
/// budget is exhausted.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The decompose phase never produced a parseable module hierarchy.
    #[error("failed to decompose {root}: no usable module hierarchy after {attempts} attempts")]
    DecomposeExhausted {
        /// The root design.
        root: String,
        /// Failed attempts made.
        attempts: u32,
    },
    /// A module's retry budget ran out before a completion was accepted.
    #[error("failed to generate {module} in {root} after {attempts} attempts")]
    ModuleExhausted {
        /// The root design.
        root: String,
        /// The module that kept failing.
        module: String,
        /// Failed attempts made.
        attempts: u32,
    },
    /// A child interface was missing when a parent prompt was built.
    #[error("failed to generate {module} (cannot get the interface of {child})")]
    MissingInterface {
        /// The parent module being prompted.
        module: String,
        /// The child whose interface is absent.
        child: String,
    },
    /// An artifact could not be written. Never retried.
    #[error("failed to write {what}: {reason}")]
    Persist {
        /// What was being persisted.
        what: String,
        /// The underlying failure.
        reason: String,
    },
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    /// The root design name.
    pub root: String,
    /// Generated module names, in generation (post-order) order.
    pub generated: Vec<String>,
}

/// Drives one generation run against a service context and configuration.
pub struct Pipeline<'a> {
    ctx: &'a ServiceContext,
    config: &'a GenConfig,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over the given context and configuration.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a GenConfig) -> Self {
        Self { ctx, config }
    }

    /// Runs the full pipeline for `root`, using `base_prompt` as the
    /// user-supplied design description sent with every request.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] when a retry budget is exhausted, a
    /// scheduling invariant is violated, or an artifact cannot be written.
    pub async fn run(&self, root: &str, base_prompt: &str) -> Result<RunSummary, GenerateError> {
        let tree = self.decompose(root, base_prompt).await?;
        let store = ArtifactStore::new(self.ctx, self.config);
        store.initialize(root, &tree).map_err(|reason| GenerateError::Persist {
            what: format!("workspace for {root}"),
            reason,
        })?;

        let mut index = ModuleIndex::default();
        let mut frontier = Frontier::seed(root, tree, &mut index);
        let mut generated = Vec::new();

        while let Some(module) = frontier.next_ready(&mut index) {
            let result = self.generate_module(root, &module, base_prompt, &index).await?;
            store.write_module_doc(root, &module, &result.interface).map_err(|reason| {
                GenerateError::Persist { what: format!("doc for {module}"), reason }
            })?;
            store.write_module_source(root, &module, &result.body).map_err(|reason| {
                GenerateError::Persist { what: format!("source for {module}"), reason }
            })?;
            index.record_interface(&module, result.interface);
            generated.push(module);
        }

        Ok(RunSummary { root: root.to_string(), generated })
    }

    /// Requests and parses the decomposition of `root`, retrying malformed
    /// responses and transport failures up to the retry bound.
    async fn decompose(&self, root: &str, base_prompt: &str) -> Result<ModuleTree, GenerateError> {
        let requirement = prompt::decompose_request(root);
        let request = self.request(format!("{base_prompt}\n{requirement}"));
        let mut attempts = 0;

        loop {
            match self.ctx.llm.complete(&request).await {
                Ok(response) => {
                    self.show_completion(&response.text);
                    match ModuleTree::parse_decomposition(root, &response.text) {
                        Ok(tree) => return Ok(tree),
                        Err(err) => {
                            eprintln!("[warning] failed to parse decomposition of {root}: {err}");
                        }
                    }
                }
                Err(err) => eprintln!("[warning] completion request failed: {err}"),
            }
            attempts += 1;
            if attempts >= self.config.retry_max {
                return Err(GenerateError::DecomposeExhausted { root: root.to_string(), attempts });
            }
        }
    }

    /// Generates one module: builds the prompt once, then resends it
    /// unchanged until a completion validates or the retry bound is hit.
    /// Resending an identical prompt relies on sampling randomness to
    /// produce a different completion.
    async fn generate_module(
        &self,
        root: &str,
        module: &str,
        base_prompt: &str,
        index: &ModuleIndex,
    ) -> Result<ExtractedModule, GenerateError> {
        let children = index.children_of(module);
        if !children.is_empty() {
            self.info(&format!("sub-modules of {module}: {}", children.join(" ")));
        }

        let requirement = prompt::encapsulate_request(module, index, &self.config.target)?;
        let header = prompt::target_header(root, &self.config.target);
        let request = self.request(format!("{header}{base_prompt}\n{requirement}"));
        let mut attempts = 0;

        loop {
            self.info(&format!("generating {module} of {root} ..."));
            if !self.config.wait.is_zero() {
                tokio::time::sleep(self.config.wait).await;
            }
            match self.ctx.llm.complete(&request).await {
                Ok(response) => {
                    self.show_completion(&response.text);
                    match validate::check_module(module, &self.config.target, &response.text) {
                        Ok(extracted) => return Ok(extracted),
                        Err(rejection) => eprintln!("[warning] {rejection} (in {root})"),
                    }
                }
                Err(err) => eprintln!("[warning] completion request failed: {err}"),
            }
            attempts += 1;
            if attempts >= self.config.retry_max {
                return Err(GenerateError::ModuleExhausted {
                    root: root.to_string(),
                    module: module.to_string(),
                    attempts,
                });
            }
        }
    }

    fn request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            model: self.config.model.clone(),
        }
    }

    fn info(&self, message: &str) {
        if !self.config.quiet {
            println!("[info] {message}");
        }
    }

    fn show_completion(&self, text: &str) {
        if !self.config.quiet {
            println!("--- completion ---");
            println!("{text}");
            println!("------------------");
        }
    }
}
