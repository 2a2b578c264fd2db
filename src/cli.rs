use crate::core::{DEFAULT_MAX_SUMMARY_CHARS, DEFAULT_MODEL};
use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tubedigest")]
#[command(about = "YouTube transcript fetcher and summarizer")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Language the transcript and summary are produced in
    #[arg(short, long, global = true, default_value = "ko")]
    pub language: String,

    /// Caption language translated from when the target language has no track
    #[arg(long, global = true, default_value = "en")]
    pub fallback_language: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the best available transcript
    Transcript {
        /// YouTube video URL or video ID
        video: String,

        /// Prefix each line with its [MM:SS] start time
        #[arg(short, long)]
        timestamps: bool,

        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the transcript and summarize it with an LLM
    Summarize {
        /// YouTube video URL or video ID
        video: String,

        /// Upper bound on the summary length, in characters
        #[arg(long, default_value_t = DEFAULT_MAX_SUMMARY_CHARS,
              value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
        max_chars: usize,

        /// OpenAI model used for the summary
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
}
