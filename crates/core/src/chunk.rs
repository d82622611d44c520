//! Splits a rendered transcript into size-bounded blocks at line boundaries.
//! Lines carry a timestamp bracket, so they are never cut mid-line.

use crate::error::{RecapError, Result};
use tracing::debug;

/// Split `text` into chunks of at most `max_chars` characters, breaking
/// only at line boundaries. The budget counts characters, not bytes, so
/// multi-byte captions pack the same as ASCII ones. Lines are
/// accumulated greedily; a buffer is flushed when the next line would
/// push it over the budget. A single line longer than `max_chars` still
/// becomes its own oversized chunk rather than being split, so
/// timestamps stay intact.
///
/// Rejoining all chunks with `\n` reproduces the input exactly. Empty
/// input produces zero chunks, which the pipeline treats as nothing to
/// summarize.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Result<Vec<String>> {
    if max_chars == 0 {
        return Err(RecapError::InvalidConfiguration {
            reason: "max_chars must be positive".to_string(),
        });
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let total_chars = text.chars().count();
    if total_chars <= max_chars {
        return Ok(vec![text.to_string()]);
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;
    for line in text.split('\n') {
        let line_chars = line.chars().count();
        // One separator character joins the line to a non-empty buffer.
        let added = if current.is_empty() {
            line_chars
        } else {
            line_chars + 1
        };
        if !current.is_empty() && current_len + added > max_chars {
            chunks.push(current.join("\n"));
            current.clear();
            current_len = line_chars;
        } else {
            current_len += added;
        }
        current.push(line);
    }
    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }
    debug!("split {} chars into {} chunks", total_chars, chunks.len());
    Ok(chunks)
}
