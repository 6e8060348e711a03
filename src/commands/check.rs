//! `hdlgen check` command.

use crate::cli::CheckArgs;
use crate::validate;

/// Execute the `check` command: run the validator over a saved completion
/// and report the extracted interface, or the rejection reason.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or the completion is
/// rejected.
pub fn run(args: &CheckArgs) -> Result<(), String> {
    let text = std::fs::read_to_string(&args.file)
        .map_err(|e| format!("failed to read {}: {e}", args.file.display()))?;

    match validate::check_module(&args.module, &args.target, &text) {
        Ok(extracted) => {
            println!(
                "accepted: {} interface lines, {} body lines",
                extracted.interface.len(),
                extracted.body.len()
            );
            for line in &extracted.interface {
                println!("{line}");
            }
            Ok(())
        }
        Err(rejection) => Err(format!("rejected: {rejection}")),
    }
}
