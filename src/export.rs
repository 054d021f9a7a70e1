/*!
 * Handoff of the merged cut list to auto-editor.
 *
 * Timeline generation and re-encoding live entirely in auto-editor; this
 * module only renders the merged cut list into its command line and runs it.
 * Margins are already baked into the merged cuts, so no `--margin` flag is
 * forwarded.
 */

use std::path::Path;

use anyhow::{anyhow, Result};
use log::{error, info};
use tokio::process::Command;

use crate::app_config::ExportTarget;
use crate::cutlist::MergedCut;

/// Build the auto-editor argument vector for a merged cut list.
pub fn build_auto_editor_args(
    video_path: &Path,
    merged: &[MergedCut],
    export: Option<ExportTarget>,
) -> Vec<String> {
    let mut args = vec![video_path.to_string_lossy().into_owned()];

    for cut in merged {
        args.push("--cut-out".to_string());
        args.push(format!("{}s,{}s", cut.start, cut.end));
    }

    if let Some(target) = export {
        args.push("--export".to_string());
        args.push(target.as_arg().to_string());
    }

    args
}

/// Render the full command line for display (dry-run mode).
pub fn format_command(args: &[String]) -> String {
    let mut rendered = String::from("auto-editor");
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

/// Run auto-editor with the given arguments, bounded by a timeout.
pub async fn run_auto_editor(args: &[String], timeout_secs: u64) -> Result<()> {
    info!("Running: {}", format_command(args));

    let future = Command::new("auto-editor").args(args).output();

    let timeout = std::time::Duration::from_secs(timeout_secs);
    let output = tokio::select! {
        result = future => {
            result.map_err(|e| anyhow!("Failed to execute auto-editor: {}", e))?
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(anyhow!("auto-editor timed out after {} seconds", timeout_secs));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("auto-editor failed: {}", stderr.trim());
        return Err(anyhow!(
            "auto-editor exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    info!("auto-editor completed successfully");
    Ok(())
}
