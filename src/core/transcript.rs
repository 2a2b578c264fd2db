use crate::error::{Error, Result};
use serde::Serialize;

/// One caption set for a video in a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub auto_generated: bool,
    pub translatable: bool,
}

impl CaptionTrack {
    pub fn new(language_code: impl Into<String>, auto_generated: bool, translatable: bool) -> Self {
        Self {
            language_code: language_code.into(),
            auto_generated,
            translatable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSegment {
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

/// A fetched caption track in playback order. Never empty.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    segments: Vec<TranscriptSegment>,
    language: String,
    auto_generated: bool,
}

impl Transcript {
    /// Builds a transcript, dropping blank segments and ordering the rest by
    /// start offset. Fails when nothing usable is left.
    pub fn new(
        segments: Vec<TranscriptSegment>,
        language: impl Into<String>,
        auto_generated: bool,
    ) -> Result<Self> {
        let mut segments: Vec<TranscriptSegment> = segments
            .into_iter()
            .filter(|segment| !segment.text.trim().is_empty())
            .collect();

        if segments.is_empty() {
            return Err(Error::custom("Caption track has no text"));
        }

        segments.sort_by(|a, b| a.start.total_cmp(&b.start));

        Ok(Self {
            segments,
            language: language.into(),
            auto_generated,
        })
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn auto_generated(&self) -> bool {
        self.auto_generated
    }

    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn timecoded_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| format!("[{}] {}", format_timecode(segment.start), segment.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `MM:SS` below an hour, `HH:MM:SS` from there on. Fractions are truncated.
pub fn format_timecode(seconds: f64) -> String {
    // `as` saturates: NaN and negatives become 0.
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(items: &[(f64, &str)]) -> Vec<TranscriptSegment> {
        items
            .iter()
            .map(|(start, text)| TranscriptSegment::new(*start, *text))
            .collect()
    }

    #[test]
    fn timecode_examples() {
        assert_eq!(format_timecode(0.0), "00:00");
        assert_eq!(format_timecode(65.0), "01:05");
        assert_eq!(format_timecode(3725.0), "01:02:05");
        assert_eq!(format_timecode(59.9), "00:59");
    }

    #[test]
    fn timecode_edges() {
        assert_eq!(format_timecode(3599.99), "59:59");
        assert_eq!(format_timecode(3600.0), "01:00:00");
        assert_eq!(format_timecode(-4.0), "00:00");
        assert_eq!(format_timecode(f64::NAN), "00:00");
    }

    #[test]
    fn renders_plain_and_timecoded() {
        let transcript =
            Transcript::new(segments(&[(0.0, "hello"), (65.2, "world")]), "ko", false)
                .expect("non-empty");

        assert_eq!(transcript.plain_text(), "hello\nworld");
        assert_eq!(transcript.timecoded_text(), "[00:00] hello\n[01:05] world");
    }

    #[test]
    fn keeps_inner_whitespace() {
        let transcript =
            Transcript::new(segments(&[(1.0, "  spaced   out ")]), "en", true).expect("non-empty");
        assert_eq!(transcript.plain_text(), "  spaced   out ");
    }

    #[test]
    fn orders_segments_and_drops_blank_ones() {
        let transcript = Transcript::new(
            segments(&[(10.0, "b"), (2.0, "a"), (5.0, "  "), (10.0, "c")]),
            "ko",
            false,
        )
        .expect("non-empty");

        let texts: Vec<&str> = transcript
            .segments()
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
        assert!(
            transcript
                .segments()
                .windows(2)
                .all(|pair| pair[0].start <= pair[1].start)
        );
    }

    #[test]
    fn rejects_empty_track() {
        assert!(Transcript::new(Vec::new(), "ko", false).is_err());
        assert!(Transcript::new(segments(&[(0.0, " \n")]), "ko", false).is_err());
    }
}
