//! Binary entry point for the transcript summarizer.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use ytrecap_core::llm::openai::{OpenAiClient, DEFAULT_MODEL};
use ytrecap_core::summarize::{DEFAULT_CONCURRENCY, DEFAULT_MAX_CHARS};
use ytrecap_core::{
    extract_video_id, render_transcript, summarize_transcript, SummarizeOptions, TimedTextClient,
    TranscriptSource,
};

/// Command line options for the binary.
#[derive(Parser)]
struct Cli {
    /// Enable verbose debug and trace logs.
    #[arg(long)]
    debug: bool,

    /// Chat model used for both summarization phases.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Caption language to try, repeatable and in preference order.
    /// Prefix with `a.` for the auto-generated track (e.g. `a.en`).
    #[arg(long = "lang")]
    languages: Vec<String>,

    /// Character budget per transcript chunk.
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Number of chunk summaries requested in parallel.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// YouTube video URL or bare video id.
    url: String,
}

/// Application entry point which parses CLI args and runs the pipeline.
/// This function should initialize logging and delegate to the core library.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::default()
            .add_directive("ytrecap=trace".parse().unwrap())
            .add_directive("ytrecap_core=trace".parse().unwrap())
            .add_directive("info".parse().unwrap())
    } else {
        EnvFilter::default()
            .add_directive("ytrecap=info".parse().unwrap())
            .add_directive("ytrecap_core=info".parse().unwrap())
            .add_directive("warn".parse().unwrap())
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let video_id = extract_video_id(&cli.url)?;
    let source = TimedTextClient::new(&cli.languages);
    let entries = source.fetch(&video_id).await?;

    println!("Subtitles with Timestamps:");
    println!("{}", render_transcript(&entries));

    let client = OpenAiClient::from_env(&cli.model)?;
    let options = SummarizeOptions {
        max_chars: cli.max_chars,
        concurrency: cli.concurrency,
    };
    let summary = summarize_transcript(&client, &entries, &options).await?;

    println!("\nSummary with Timestamps:");
    println!("{summary}");
    Ok(())
}
