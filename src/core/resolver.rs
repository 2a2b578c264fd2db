//! Picks the best caption track for a video and turns it into a [`Transcript`].
//!
//! Tracks are tried in a fixed order: a manual track in the target language,
//! then an auto-generated one, then a fallback-language track translated into
//! the target language. The first strategy whose track fetches cleanly wins.

use crate::core::captions::{CaptionListing, CaptionSource};
use crate::core::transcript::{CaptionTrack, Transcript};
use derive_more::Display;

/// No transcript could be produced for the video.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("No transcript available for {video_id}: {reason}")]
pub struct Unavailable {
    pub video_id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct LanguagePlan {
    pub target: String,
    pub fallback: String,
}

impl Default for LanguagePlan {
    fn default() -> Self {
        Self {
            target: "ko".to_string(),
            fallback: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Selection<'a> {
    track: &'a CaptionTrack,
    translate_to: Option<&'a str>,
    auto_generated: bool,
}

struct Strategy {
    name: &'static str,
    select: for<'a> fn(&'a [CaptionTrack], &'a LanguagePlan) -> Option<Selection<'a>>,
}

const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "manual target-language track",
        select: select_manual,
    },
    Strategy {
        name: "auto-generated target-language track",
        select: select_auto,
    },
    Strategy {
        name: "translated fallback-language track",
        select: select_translated,
    },
];

fn select_manual<'a>(tracks: &'a [CaptionTrack], plan: &'a LanguagePlan) -> Option<Selection<'a>> {
    tracks
        .iter()
        .find(|t| !t.auto_generated && t.language_code == plan.target)
        .map(|track| Selection {
            track,
            translate_to: None,
            auto_generated: false,
        })
}

fn select_auto<'a>(tracks: &'a [CaptionTrack], plan: &'a LanguagePlan) -> Option<Selection<'a>> {
    tracks
        .iter()
        .find(|t| t.auto_generated && t.language_code == plan.target)
        .map(|track| Selection {
            track,
            translate_to: None,
            auto_generated: true,
        })
}

fn select_translated<'a>(
    tracks: &'a [CaptionTrack],
    plan: &'a LanguagePlan,
) -> Option<Selection<'a>> {
    // Translating a language into itself would refetch a track already tried.
    if plan.fallback == plan.target {
        return None;
    }

    let candidates = || {
        tracks
            .iter()
            .filter(|t| t.translatable && t.language_code == plan.fallback)
    };

    candidates()
        .find(|t| !t.auto_generated)
        .or_else(|| candidates().next())
        .map(|track| Selection {
            track,
            translate_to: Some(plan.target.as_str()),
            auto_generated: true,
        })
}

pub struct TranscriptResolver<S> {
    source: S,
    plan: LanguagePlan,
}

impl<S: CaptionSource> TranscriptResolver<S> {
    pub fn new(source: S, plan: LanguagePlan) -> Self {
        Self { source, plan }
    }

    pub async fn resolve(&self, video_id: &str) -> Result<Transcript, Unavailable> {
        let unavailable = |reason: String| Unavailable {
            video_id: video_id.to_string(),
            reason,
        };

        let listing = self
            .source
            .list_tracks(video_id)
            .await
            .map_err(|e| unavailable(format!("could not list caption tracks: {e}")))?;
        let tracks = listing.tracks();

        if tracks.is_empty() {
            return Err(unavailable("video has no caption tracks".to_string()));
        }
        tracing::debug!(video_id, count = tracks.len(), "listed caption tracks");

        let mut last_failure = None;
        for strategy in STRATEGIES {
            let Some(selection) = (strategy.select)(&tracks, &self.plan) else {
                continue;
            };
            tracing::debug!(
                video_id,
                strategy = strategy.name,
                language = %selection.track.language_code,
                "selected caption track"
            );

            match fetch(&listing, &selection).await {
                Ok(transcript) => {
                    tracing::info!(
                        video_id,
                        language = transcript.language(),
                        auto_generated = transcript.auto_generated(),
                        segments = transcript.segments().len(),
                        "resolved transcript via {}",
                        strategy.name
                    );
                    return Ok(transcript);
                }
                Err(reason) => {
                    tracing::warn!(video_id, strategy = strategy.name, "{reason}");
                    last_failure = Some(format!("{}: {reason}", strategy.name));
                }
            }
        }

        Err(unavailable(last_failure.unwrap_or_else(|| {
            format!(
                "no caption track in '{}' or translatable track in '{}'",
                self.plan.target, self.plan.fallback
            )
        })))
    }

}

async fn fetch<L: CaptionListing>(
    listing: &L,
    selection: &Selection<'_>,
) -> Result<Transcript, String> {
    let segments = listing
        .fetch_segments(selection.track, selection.translate_to)
        .await
        .map_err(|e| format!("fetch failed: {e}"))?;

    let language = selection
        .translate_to
        .unwrap_or(&selection.track.language_code);

    Transcript::new(segments, language, selection.auto_generated).map_err(|e| e.to_string())
}
