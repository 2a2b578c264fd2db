use crate::core::captions::CaptionSource;
use crate::core::resolver::{TranscriptResolver, Unavailable};
use crate::core::summarizer::{ChatModel, ContentSummarizer, SummaryOutcome};
use crate::core::transcript::Transcript;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub video_id: String,
    pub transcript: Transcript,
    pub summary: SummaryOutcome,
}

/// Resolves the transcript, then summarizes it. No summary is requested when
/// there is no transcript.
pub async fn analyze<S: CaptionSource, M: ChatModel>(
    resolver: &TranscriptResolver<S>,
    summarizer: &ContentSummarizer<M>,
    video_id: &str,
    max_summary_chars: usize,
) -> Result<Analysis, Unavailable> {
    let transcript = resolver.resolve(video_id).await?;
    let summary = summarizer
        .summarize(&transcript.plain_text(), max_summary_chars)
        .await;

    Ok(Analysis {
        video_id: video_id.to_string(),
        transcript,
        summary,
    })
}
