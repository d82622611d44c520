//! Map-reduce summarization over a rendered transcript.
//! Each chunk is summarized independently, then the partial outlines are
//! merged by one final completion call.

use crate::chunk::split_into_chunks;
use crate::error::{RecapError, Result, Stage};
use crate::llm::{ChatCompletion, CompletionRequest};
use crate::transcript::{render_transcript, CaptionEntry};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

/// Default character budget per chunk.
pub const DEFAULT_MAX_CHARS: usize = 6000;

/// Default number of chunk summaries in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Sampling temperature for both phases; kept low so repeated runs and
/// the merge-stage deduplication stay consistent.
const TEMPERATURE: f32 = 0.2;

/// Rule marker placed between partial summaries in the merge prompt.
const PARTIAL_SEPARATOR: &str = "\n\n---\n\n";

/// Tuning knobs for the pipeline.
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Character budget handed to the chunker.
    pub max_chars: usize,
    /// Upper bound on concurrent chunk summarization calls.
    pub concurrency: usize,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl SummarizeOptions {
    fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(RecapError::InvalidConfiguration {
                reason: "max_chars must be positive".to_string(),
            });
        }
        if self.concurrency == 0 {
            return Err(RecapError::InvalidConfiguration {
                reason: "concurrency must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Build the map-phase prompt embedding one chunk verbatim.
fn chunk_prompt(chunk: &str) -> CompletionRequest {
    CompletionRequest {
        system: "You summarize YouTube subtitles with timestamps.".to_string(),
        user: format!(
            "Below is part of a video transcript with timestamps.\n\
             Summarize it into 5-10 concise bullet points. Keep the timestamps \
             from the transcript on every point.\n\nTranscript:\n{chunk}"
        ),
        temperature: TEMPERATURE,
    }
}

/// Build the reduce-phase prompt over all partial summaries.
/// Deduplication is delegated to the model; the earliest timestamp wins
/// for duplicate events, which is why partials must arrive in chunk order.
fn merge_prompt(partials: &[String]) -> CompletionRequest {
    let joined = partials.join(PARTIAL_SEPARATOR);
    CompletionRequest {
        system: "You merge partial video summaries into one outline.".to_string(),
        user: format!(
            "Below are partial summaries of consecutive parts of one video, \
             in order.\nMerge them into a single outline of roughly 10-15 \
             bullet points. Deduplicate points that describe the same event, \
             keeping the earliest timestamp.\n\nPartial summaries:\n{joined}"
        ),
        temperature: TEMPERATURE,
    }
}

/// Summarize one chunk into a timestamped bullet list.
async fn summarize_chunk<C>(client: &C, index: usize, chunk: &str) -> Result<String>
where
    C: ChatCompletion + ?Sized,
{
    debug!("summarizing chunk {} ({} chars)", index, chunk.len());
    client
        .complete(chunk_prompt(chunk))
        .await
        .map_err(|source| RecapError::Summarization {
            stage: Stage::Chunk(index),
            source,
        })
}

/// Merge the partial summaries into the final outline.
async fn merge_summaries<C>(client: &C, partials: &[String]) -> Result<String>
where
    C: ChatCompletion + ?Sized,
{
    debug!("merging {} partial summaries", partials.len());
    client
        .complete(merge_prompt(partials))
        .await
        .map_err(|source| RecapError::Summarization {
            stage: Stage::Merge,
            source,
        })
}

/// Run the full pipeline: render, chunk, summarize each chunk, merge.
///
/// Chunk calls run through an ordered stream bounded by
/// `options.concurrency`, so partial summaries are collected in original
/// chunk order and the first failure aborts the run with no partial
/// output. `concurrency: 1` gives the fully sequential behavior.
///
/// Zero caption entries produce an empty summary without any model
/// calls, and a single partial summary is returned directly instead of
/// going through the merge call, since the chunk prompt already yields a
/// timestamped outline.
pub async fn summarize_transcript<C>(
    client: &C,
    entries: &[CaptionEntry],
    options: &SummarizeOptions,
) -> Result<String>
where
    C: ChatCompletion + ?Sized,
{
    options.validate()?;
    let rendered = render_transcript(entries);
    let chunks = split_into_chunks(&rendered, options.max_chars)?;
    if chunks.is_empty() {
        info!("transcript is empty, nothing to summarize");
        return Ok(String::new());
    }
    info!("summarizing {} chunks", chunks.len());
    let mut partials: Vec<String> = stream::iter(chunks.iter().enumerate())
        .map(|(i, chunk)| summarize_chunk(client, i + 1, chunk.as_str()))
        .buffered(options.concurrency)
        .try_collect()
        .await?;
    if partials.len() == 1 {
        debug!("single chunk, skipping merge call");
        return Ok(partials.remove(0));
    }
    merge_summaries(client, &partials).await
}
