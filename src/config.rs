//! Run configuration and the in-text structural markers.

use std::path::PathBuf;
use std::time::Duration;

/// Marker opening a delimited section in a completion.
pub const BEGIN_MARKER: &str = "####[BEGIN]####";

/// Marker closing a delimited section in a completion.
pub const END_MARKER: &str = "####[END]####";

/// Marker the model is asked to emit when an implementation is incomplete.
pub const NO_IMPL_MARKER: &str = "####[NO IMPLEMENTATION]####";

/// Immutable configuration for one generation run.
///
/// Constructed once from CLI flags and environment, then passed by reference
/// to every component that needs it. The service endpoint and API credential
/// are deliberately absent: they belong to the live completion client, not to
/// the pipeline.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Target artifact language tag (e.g. `"chisel"`).
    pub target: String,
    /// Sampling temperature passed through to the completion service.
    pub temperature: f32,
    /// Optional completion token cap; omitted from requests when `None`.
    pub max_tokens: Option<u32>,
    /// Optional model identifier; omitted from requests when `None`.
    pub model: Option<String>,
    /// Number of failed attempts after which a module (or the decompose
    /// phase) aborts the whole run.
    pub retry_max: u32,
    /// Fixed delay observed before each per-module completion request.
    pub wait: Duration,
    /// Root directory for generated sources and documentation.
    pub out_dir: PathBuf,
    /// Suppress informational output (warnings still go to stderr).
    pub quiet: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            target: "chisel".to_string(),
            temperature: 0.0,
            max_tokens: None,
            model: None,
            retry_max: 5,
            wait: Duration::from_secs(2),
            out_dir: PathBuf::from("."),
            quiet: false,
        }
    }
}
