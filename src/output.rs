//! Writing the PDF to disk and opening it.

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// File name stem used when a title sanitizes to nothing
const FALLBACK_STEM: &str = "paper";

/// Turn a paper title into a safe file name stem.
///
/// Whitespace runs become `_`; anything other than alphanumerics, `-`, `_`
/// and `.` is dropped.
pub fn sanitize_title(title: &str) -> String {
    let joined = title.split_whitespace().collect::<Vec<_>>().join("_");
    let safe: String = joined
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .collect();
    let safe = safe.trim_matches(|c| c == '_' || c == '.');

    if safe.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        safe.to_string()
    }
}

/// `{dir}/{sanitized title}.pdf`
pub fn default_output_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}.pdf", sanitize_title(title)))
}

/// Write the document verbatim, replacing whatever is at `path`.
pub async fn write_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    info!(path = %path.display(), size = bytes.len(), "Saved PDF");
    Ok(())
}

/// Hand the file to the desktop's default viewer and wait for the opener.
///
/// The download already succeeded at this point, so a missing opener or a
/// non-zero exit is only logged.
pub async fn open_file(path: &Path) {
    run_opener(opener_command(path), path).await;
}

/// Run an opener command to completion; `true` when it exited cleanly.
async fn run_opener(mut command: Command, path: &Path) -> bool {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match command.status().await {
        Ok(status) if status.success() => {
            debug!(path = %path.display(), "Opened PDF");
            true
        }
        Ok(status) => {
            warn!(path = %path.display(), code = ?status.code(), "PDF opener exited with failure");
            false
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to open PDF");
            false
        }
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
