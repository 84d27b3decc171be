//! Frame sinks.
//!
//! Sinks consume rendered frames in timeline order and are fed by
//! [`crate::session::ExportSession`].

use std::path::Path;

use crate::foundation::error::{GapminderError, GapminderResult};

/// `ffmpeg`-based MP4 output via the system `ffmpeg`.
pub mod ffmpeg;
/// Numbered PNG files in a directory.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> GapminderResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            GapminderError::encode(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}
