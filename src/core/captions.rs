use crate::core::transcript::{CaptionTrack, TranscriptSegment};
use crate::error::Result;

/// Where caption tracks come from.
pub trait CaptionSource {
    type Listing: CaptionListing;

    /// Lists every track of the video once. Fetches go through the listing.
    async fn list_tracks(&self, video_id: &str) -> Result<Self::Listing>;
}

/// The tracks listed for one video.
pub trait CaptionListing {
    fn tracks(&self) -> Vec<CaptionTrack>;

    /// Fetches the segments of `track`, machine-translated into
    /// `translate_to` when given.
    async fn fetch_segments(
        &self,
        track: &CaptionTrack,
        translate_to: Option<&str>,
    ) -> Result<Vec<TranscriptSegment>>;
}
