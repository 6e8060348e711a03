//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `hdlgen`.
#[derive(Debug, Parser)]
#[command(name = "hdlgen", version, about = "Generate hardware module hierarchies via an LLM")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the generation pipeline for a prompt file or a directory of them.
    Run(RunArgs),
    /// Validate a saved completion without calling the service.
    Check(CheckArgs),
}

/// Arguments for `hdlgen run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Prompt file (its stem names the root design) or a directory of
    /// prompt files processed in sorted order.
    pub prompt: PathBuf,

    /// Target artifact language.
    #[arg(long, default_value = "chisel")]
    pub target: String,

    /// Completion service endpoint (an OpenAI-compatible chat-completions
    /// URL). Required unless `--replay` is given.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Model identifier to request, when the endpoint needs one.
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature.
    #[arg(long, default_value_t = 0.0)]
    pub temperature: f32,

    /// Cap on generated tokens per completion.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// API credential; falls back to the `HDLGEN_API_KEY` environment
    /// variable (a `.env` file is honored).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Root directory for generated sources and documentation.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Failed attempts per module (or for the decompose phase) before the
    /// run aborts.
    #[arg(long, default_value_t = 5)]
    pub retry_max: u32,

    /// Seconds to wait before each per-module completion request.
    #[arg(long, default_value_t = 2)]
    pub wait_secs: u64,

    /// Record every successful completion to a cassette file.
    #[arg(long, conflicts_with = "replay")]
    pub record: Option<PathBuf>,

    /// Serve completions from a cassette file instead of the network.
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Suppress informational output.
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for `hdlgen check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// File holding the completion text to validate.
    pub file: PathBuf,

    /// The module name the completion is supposed to implement.
    #[arg(long)]
    pub module: String,

    /// Target artifact language.
    #[arg(long, default_value = "chisel")]
    pub target: String,
}
