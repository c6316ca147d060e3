//! Gates applied to transcript text before analysis: file type and size.

use crate::config::InputConfig;
use crate::error::{Result, ShapeError};
use std::path::Path;

/// Read a transcript file, accepting only the configured extensions.
pub fn read_transcript_file(path: &Path, config: &InputConfig) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    let allowed = config
        .allowed_extensions
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&extension));
    if extension.is_empty() || !allowed {
        return Err(ShapeError::UnsupportedFile {
            path: path.display().to_string(),
            allowed: config.allowed_extensions.join(", "),
        });
    }

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    tracing::debug!("read {} bytes from {}", bytes.len(), path.display());
    check_size(&text, config)?;
    Ok(text)
}

/// Enforce the character limit; log when the text is close to it.
pub fn check_size(text: &str, config: &InputConfig) -> Result<()> {
    let chars = text.chars().count();
    if chars > config.char_limit {
        return Err(ShapeError::InputTooLarge {
            chars,
            limit: config.char_limit,
        });
    }
    if chars > config.warn_limit {
        tracing::warn!(
            "transcript is {} characters, approaching the {} character limit",
            chars,
            config.char_limit
        );
    }
    Ok(())
}
