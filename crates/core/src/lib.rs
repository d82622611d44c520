//! Core library for ytrecap.
//! Fetches a video's timestamped captions and condenses them into a
//! timestamp-preserving outline through a chat completion model, using a
//! map-reduce pipeline over size-bounded transcript chunks.

pub mod chunk;
pub mod error;
pub mod llm;
pub mod summarize;
pub mod transcript;
pub mod youtube;

pub use chunk::split_into_chunks;
pub use error::{LlmError, RecapError, Result, Stage};
pub use llm::{ChatCompletion, CompletionRequest};
pub use summarize::{summarize_transcript, SummarizeOptions};
pub use transcript::{format_timestamp, render_transcript, CaptionEntry};
pub use youtube::{extract_video_id, TimedTextClient, TranscriptSource};
