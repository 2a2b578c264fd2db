use crate::core::captions::{CaptionListing, CaptionSource};
use crate::core::transcript::{CaptionTrack, TranscriptSegment};
use crate::error::{Error, Result};
use yt_transcript_rs::{TranscriptList, api::YouTubeTranscriptApi};

/// Caption tracks served by YouTube itself.
#[derive(Clone)]
pub struct YouTubeCaptions {
    api: YouTubeTranscriptApi,
    client: reqwest::Client,
}

impl YouTubeCaptions {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)?;
        Ok(Self {
            api,
            client: reqwest::Client::new(),
        })
    }
}

impl CaptionSource for YouTubeCaptions {
    type Listing = YouTubeListing;

    async fn list_tracks(&self, video_id: &str) -> Result<YouTubeListing> {
        let list = self.api.list_transcripts(video_id).await?;
        Ok(YouTubeListing {
            list,
            client: self.client.clone(),
        })
    }
}

pub struct YouTubeListing {
    list: TranscriptList,
    client: reqwest::Client,
}

impl CaptionListing for YouTubeListing {
    fn tracks(&self) -> Vec<CaptionTrack> {
        self.list
            .transcripts()
            .map(|t| CaptionTrack::new(t.language_code(), t.is_generated(), t.is_translatable()))
            .collect()
    }

    async fn fetch_segments(
        &self,
        track: &CaptionTrack,
        translate_to: Option<&str>,
    ) -> Result<Vec<TranscriptSegment>> {
        let codes = [track.language_code.as_str()];

        let transcript = if track.auto_generated {
            self.list.find_generated_transcript(&codes)?
        } else {
            self.list.find_manually_created_transcript(&codes)?
        };

        let transcript = match translate_to {
            Some(target) => {
                if !transcript.is_translatable() {
                    return Err(Error::custom(format!(
                        "'{}' captions cannot be translated",
                        track.language_code
                    )));
                }
                transcript.translate(target)?
            }
            None => transcript,
        };

        let fetched = transcript.fetch(&self.client, false).await?;
        tracing::debug!(
            video_id = %self.list.video_id,
            language = %track.language_code,
            translated = translate_to.is_some(),
            snippets = fetched.snippets.len(),
            "fetched caption track"
        );

        Ok(fetched
            .snippets
            .into_iter()
            .map(|snippet| TranscriptSegment::new(snippet.start, snippet.text))
            .collect())
    }
}
