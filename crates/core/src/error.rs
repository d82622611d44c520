//! Typed failure taxonomy for the summarization pipeline.
//! Callers can branch on the variant instead of matching on message text.

use std::fmt;
use thiserror::Error;

/// Pipeline stage an LLM failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Map phase; carries the 1-based chunk index.
    Chunk(usize),
    /// Reduce phase over the collected partial summaries.
    Merge,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Chunk(index) => write!(f, "chunk {index}"),
            Stage::Merge => write!(f, "merge"),
        }
    }
}

/// Failure kinds reported by the chat completion collaborator.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimit(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Top-level error type surfaced by the core library.
#[derive(Debug, Error)]
pub enum RecapError {
    #[error("could not resolve a video id from {input:?}")]
    SourceResolution { input: String },

    #[error("no caption track for video {video_id} in languages [{languages}]")]
    TranscriptUnavailable { video_id: String, languages: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("summarization failed at {stage}: {source}")]
    Summarization {
        stage: Stage,
        #[source]
        source: LlmError,
    },

    #[error("transcript fetch failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RecapError>;
