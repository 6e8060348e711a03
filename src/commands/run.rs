//! `hdlgen run` command.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cassette::recorder::CassetteRecorder;
use crate::cli::RunArgs;
use crate::config::GenConfig;
use crate::context::ServiceContext;
use crate::generate::Pipeline;

/// Execute the `run` command.
///
/// The pipeline is fully sequential — one completion request in flight at a
/// time — so a current-thread runtime is all it needs.
///
/// # Errors
///
/// Returns an error string when configuration is incomplete, a prompt file
/// cannot be read, or the generation pipeline fails.
pub fn run(args: &RunArgs) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime.block_on(run_inner(args))
}

async fn run_inner(args: &RunArgs) -> Result<(), String> {
    let config = GenConfig {
        target: args.target.clone(),
        temperature: args.temperature,
        max_tokens: args.max_tokens,
        model: args.model.clone(),
        retry_max: args.retry_max,
        wait: Duration::from_secs(args.wait_secs),
        out_dir: args.out_dir.clone(),
        quiet: args.quiet,
    };
    let (ctx, recorder) = build_context(args)?;
    let files = collect_prompt_files(&args.prompt)?;

    let mut outcome = Ok(());
    for file in &files {
        let root = root_name(file)?;
        let base_prompt = ctx
            .fs
            .read_to_string(file)
            .map_err(|e| format!("failed to read prompt {}: {e}", file.display()))?;

        let pipeline = Pipeline::new(&ctx, &config);
        match pipeline.run(&root, &base_prompt).await {
            Ok(summary) => {
                if !config.quiet {
                    println!(
                        "Generated {} modules for {}: {}",
                        summary.generated.len(),
                        summary.root,
                        summary.generated.join(", ")
                    );
                }
            }
            Err(err) => {
                outcome = Err(err.to_string());
                break;
            }
        }
    }

    // Write the cassette even when the run failed; a partial recording is
    // still replayable up to the failure point.
    if let Some(recorder) = recorder {
        drop(ctx);
        finish_recording(recorder)?;
    }

    outcome
}

/// Builds the service context for the selected mode: replaying, recording,
/// or live.
fn build_context(
    args: &RunArgs,
) -> Result<(ServiceContext, Option<Arc<Mutex<CassetteRecorder>>>), String> {
    if let Some(path) = &args.replay {
        return Ok((ServiceContext::replaying(path)?, None));
    }

    let endpoint = args
        .endpoint
        .as_deref()
        .ok_or_else(|| "--endpoint is required unless --replay is given".to_string())?;
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("HDLGEN_API_KEY").ok())
        .ok_or_else(|| "API key missing: pass --api-key or set HDLGEN_API_KEY".to_string())?;

    if let Some(record_path) = &args.record {
        let name = record_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("hdlgen-run")
            .to_string();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(record_path, name)));
        Ok((ServiceContext::recording(endpoint, &api_key, Arc::clone(&recorder)), Some(recorder)))
    } else {
        Ok((ServiceContext::live(endpoint, &api_key), None))
    }
}

/// Resolves the prompt argument to a sorted list of prompt files.
fn collect_prompt_files(path: &Path) -> Result<Vec<PathBuf>, String> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    let entries = std::fs::read_dir(path)
        .map_err(|e| format!("failed to read prompt directory {}: {e}", path.display()))?;
    for entry in entries {
        let entry =
            entry.map_err(|e| format!("failed to read prompt directory entry: {e}"))?;
        if entry.path().is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    if files.is_empty() {
        return Err(format!("no prompt files in {}", path.display()));
    }
    Ok(files)
}

/// The root design name is the prompt file's stem.
fn root_name(file: &Path) -> Result<String, String> {
    file.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| format!("invalid prompt file name: {}", file.display()))
}

/// Finish a recording session and report where the cassette was written.
fn finish_recording(recorder: Arc<Mutex<CassetteRecorder>>) -> Result<(), String> {
    let recorder = Arc::try_unwrap(recorder)
        .map_err(|_| "cassette recorder still has live references".to_string())?;
    let recorder =
        recorder.into_inner().map_err(|_| "cassette recorder lock poisoned".to_string())?;
    let path = recorder.finish().map_err(|e| format!("failed to write cassette: {e}"))?;
    eprintln!("Cassette written to {}", path.display());
    Ok(())
}
