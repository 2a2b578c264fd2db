mod cli;
mod config;
mod core;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::core::{
    ContentSummarizer, OpenAiChat, TranscriptResolver, YouTubeCaptions, analyze, extract_video_id,
};
use crate::error::{Error, Result};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let settings = Settings::load(&cli);

    match cli.command {
        Commands::Transcript {
            video,
            timestamps,
            json,
        } => run_transcript(&settings, &video, timestamps, json).await,
        Commands::Summarize {
            video,
            max_chars,
            model,
            json,
        } => run_summarize(&settings, &video, max_chars, &model, json).await,
    }
}

fn parse_video(input: &str) -> Result<String> {
    extract_video_id(input).ok_or_else(|| Error::custom("Invalid video URL or ID"))
}

fn resolver(settings: &Settings) -> Result<TranscriptResolver<YouTubeCaptions>> {
    Ok(TranscriptResolver::new(
        YouTubeCaptions::new()?,
        settings.languages.clone(),
    ))
}

async fn run_transcript(
    settings: &Settings,
    video: &str,
    timestamps: bool,
    json: bool,
) -> Result<()> {
    let video_id = parse_video(video)?;
    tracing::info!("Fetching transcript for {video_id}");

    let transcript = resolver(settings)?
        .resolve(&video_id)
        .await
        .map_err(|unavailable| Error::custom(unavailable.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    } else if timestamps {
        println!("{}", transcript.timecoded_text());
    } else {
        println!("{}", transcript.plain_text());
    }

    Ok(())
}

async fn run_summarize(
    settings: &Settings,
    video: &str,
    max_chars: usize,
    model: &str,
    json: bool,
) -> Result<()> {
    let video_id = parse_video(video)?;

    // Checked before any network traffic.
    let chat = OpenAiChat::new(settings.api_key.clone(), model)?;
    let summarizer = ContentSummarizer::new(chat, settings.languages.target.as_str());
    let resolver = resolver(settings)?;

    tracing::info!("Analyzing {video_id}");
    let analysis = analyze(&resolver, &summarizer, &video_id, max_chars)
        .await
        .map_err(|unavailable| Error::custom(unavailable.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    if let Some(failure) = analysis.summary.failure() {
        eprintln!("Warning: {failure}");
    }

    let transcript = &analysis.transcript;
    let record = analysis.summary.record();
    println!(
        "Transcript: {} ({})",
        transcript.language(),
        if transcript.auto_generated() {
            "auto-generated"
        } else {
            "manual"
        }
    );
    println!();
    println!("Summary");
    println!("{}", record.summary);
    println!();
    println!("Key points");
    println!("{}", record.key_points);
    println!();
    println!("Topics");
    println!("{}", record.topics);

    Ok(())
}
