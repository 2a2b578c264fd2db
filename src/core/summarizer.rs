use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 500;

const KEY_POINTS_RANGE: std::ops::RangeInclusive<usize> = 5..=7;
const TOPICS_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";
const KEY_POINTS_UNAVAILABLE: &str = "Key points could not be extracted.";
const TOPICS_UNAVAILABLE: &str = "Topics could not be extracted.";

/// A chat-completion backend.
pub trait ChatModel {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String>;
}

impl<M: ChatModel> ChatModel for &M {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        (**self).complete(prompt, temperature).await
    }
}

/// Summary, key points and topics ready for display. Lists are rendered as
/// `• ` bullet lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub summary: String,
    pub key_points: String,
    pub topics: String,
}

impl SummaryRecord {
    pub fn unavailable() -> Self {
        Self {
            summary: SUMMARY_UNAVAILABLE.to_string(),
            key_points: KEY_POINTS_UNAVAILABLE.to_string(),
            topics: TOPICS_UNAVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SummaryFailure {
    #[display("model reply did not match the summary shape: {_0}")]
    Parse(String),
    #[display("model request failed: {_0}")]
    Upstream(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryOutcome {
    Parsed { record: SummaryRecord },
    Fallback {
        record: SummaryRecord,
        failure: SummaryFailure,
    },
}

impl SummaryOutcome {
    pub fn record(&self) -> &SummaryRecord {
        match self {
            Self::Parsed { record } | Self::Fallback { record, .. } => record,
        }
    }

    pub fn failure(&self) -> Option<&SummaryFailure> {
        match self {
            Self::Parsed { .. } => None,
            Self::Fallback { failure, .. } => Some(failure),
        }
    }

    fn fallback(failure: SummaryFailure) -> Self {
        Self::Fallback {
            record: SummaryRecord::unavailable(),
            failure,
        }
    }
}

/// The shape the model is asked to reply with.
#[derive(Debug, Deserialize)]
struct ModelReply {
    summary: String,
    key_points: Vec<String>,
    topics: Vec<String>,
}

pub struct ContentSummarizer<M> {
    model: M,
    language: String,
}

impl<M: ChatModel> ContentSummarizer<M> {
    pub fn new(model: M, language: impl Into<String>) -> Self {
        Self {
            model,
            language: language.into(),
        }
    }

    /// One deterministic model call. Never fails: problems come back as
    /// [`SummaryOutcome::Fallback`].
    pub async fn summarize(
        &self,
        transcript_text: &str,
        max_summary_chars: usize,
    ) -> SummaryOutcome {
        let prompt = render_prompt(transcript_text, max_summary_chars, &self.language);
        tracing::debug!(prompt_chars = prompt.chars().count(), "requesting summary");

        let reply = match self.model.complete(&prompt, 0.0).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Summary request failed: {e}");
                return SummaryOutcome::fallback(SummaryFailure::Upstream(e.to_string()));
            }
        };

        match parse_reply(&reply, max_summary_chars) {
            Ok(record) => SummaryOutcome::Parsed { record },
            Err(failure) => {
                tracing::warn!(reply = %reply, "{failure}");
                SummaryOutcome::fallback(failure)
            }
        }
    }
}

fn render_prompt(transcript: &str, max_summary_chars: usize, language: &str) -> String {
    format!(
        r#"Below is the caption text of a YouTube video. Based on it, write the following three things in the language with code "{language}":

1. An overall summary of the content (at most {max_summary_chars} characters)
2. Key points ({kp_min}-{kp_max} items)
3. Main topics ({t_min}-{t_max} items)

Captions:
<TRANSCRIPT>
{transcript}
</TRANSCRIPT>

Reply with a single JSON object and nothing else, in exactly this shape:
{{
    "summary": "overall summary",
    "key_points": ["key point 1", "key point 2"],
    "topics": ["topic 1", "topic 2"]
}}
"#,
        kp_min = KEY_POINTS_RANGE.start(),
        kp_max = KEY_POINTS_RANGE.end(),
        t_min = TOPICS_RANGE.start(),
        t_max = TOPICS_RANGE.end(),
    )
}

/// Validates a model reply against the summary shape.
pub fn parse_reply(
    reply: &str,
    max_summary_chars: usize,
) -> std::result::Result<SummaryRecord, SummaryFailure> {
    let body = strip_code_fence(reply);
    let object = match (body.find('{'), body.rfind('}')) {
        (Some(open), Some(close)) if open < close => &body[open..=close],
        _ => return Err(SummaryFailure::Parse("no JSON object in reply".to_string())),
    };

    let parsed: ModelReply =
        serde_json::from_str(object).map_err(|e| SummaryFailure::Parse(e.to_string()))?;

    if !KEY_POINTS_RANGE.contains(&parsed.key_points.len()) {
        tracing::warn!(count = parsed.key_points.len(), "unexpected number of key points");
    }
    if !TOPICS_RANGE.contains(&parsed.topics.len()) {
        tracing::warn!(count = parsed.topics.len(), "unexpected number of topics");
    }

    Ok(SummaryRecord {
        summary: clip_chars(parsed.summary.trim(), max_summary_chars),
        key_points: bullet_lines(&parsed.key_points),
        topics: bullet_lines(&parsed.topics),
    })
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string, e.g. "json".
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn clip_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

fn bullet_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    pub(crate) const WELL_FORMED: &str = r#"{
        "summary": "A walk through Rust ownership.",
        "key_points": ["Values have one owner", "Borrows are checked", "Moves transfer ownership",
                       "Clones copy data", "Lifetimes bound references"],
        "topics": ["ownership", "borrowing", "lifetimes"]
    }"#;

    /// Replays a canned reply and records every call.
    pub(crate) struct StubModel {
        pub reply: std::result::Result<String, String>,
        pub calls: Mutex<Vec<(String, f32)>>,
    }

    impl StubModel {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatModel for StubModel {
        async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), temperature));
            self.reply.clone().map_err(Error::custom)
        }
    }

    #[tokio::test]
    async fn parses_well_formed_reply() {
        let summarizer = ContentSummarizer::new(StubModel::replying(WELL_FORMED), "en");
        let outcome = summarizer.summarize("some captions", DEFAULT_MAX_SUMMARY_CHARS).await;

        assert!(outcome.failure().is_none());
        let record = outcome.record();
        assert_eq!(record.summary, "A walk through Rust ownership.");
        assert_eq!(record.key_points.lines().count(), 5);
        assert!(record.key_points.lines().all(|line| line.starts_with("• ")));
        assert_eq!(
            record.topics,
            "• ownership\n• borrowing\n• lifetimes"
        );
    }

    #[tokio::test]
    async fn sends_one_deterministic_request_with_bounds() {
        let summarizer = ContentSummarizer::new(StubModel::replying(WELL_FORMED), "ko");
        summarizer.summarize("caption body", 321).await;

        let calls = summarizer.model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (prompt, temperature) = &calls[0];
        assert_eq!(*temperature, 0.0);
        assert!(prompt.contains("caption body"));
        assert!(prompt.contains("at most 321 characters"));
        assert!(prompt.contains("\"ko\""));
        assert!(prompt.contains("5-7"));
        assert!(prompt.contains("3-5"));
    }

    #[tokio::test]
    async fn repeated_calls_yield_same_shape() {
        let summarizer = ContentSummarizer::new(StubModel::replying(WELL_FORMED), "en");
        let first = summarizer.summarize("same text", 500).await;
        let second = summarizer.summarize("same text", 500).await;

        assert_eq!(first, second);
        let points = first.record().key_points.lines().count();
        assert!(KEY_POINTS_RANGE.contains(&points));
        let topics = first.record().topics.lines().count();
        assert!(TOPICS_RANGE.contains(&topics));
    }

    #[tokio::test]
    async fn prose_reply_falls_back_to_placeholders() {
        let summarizer = ContentSummarizer::new(
            StubModel::replying("Sure! This video is about cooking pasta."),
            "en",
        );
        let outcome = summarizer.summarize("captions", 500).await;

        assert_eq!(outcome.record(), &SummaryRecord::unavailable());
        assert!(matches!(outcome.failure(), Some(SummaryFailure::Parse(_))));
    }

    #[tokio::test]
    async fn upstream_error_falls_back_to_placeholders() {
        let summarizer = ContentSummarizer::new(StubModel::failing("HTTP 503"), "en");
        let outcome = summarizer.summarize("captions", 500).await;

        assert_eq!(outcome.record(), &SummaryRecord::unavailable());
        match outcome.failure() {
            Some(SummaryFailure::Upstream(detail)) => assert!(detail.contains("HTTP 503")),
            other => panic!("expected upstream failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_key_or_wrong_type_is_a_parse_failure() {
        let missing = r#"{"summary": "x", "key_points": ["a"]}"#;
        assert!(matches!(parse_reply(missing, 500), Err(SummaryFailure::Parse(_))));

        let wrong_type = r#"{"summary": "x", "key_points": "a, b", "topics": ["t"]}"#;
        assert!(matches!(parse_reply(wrong_type, 500), Err(SummaryFailure::Parse(_))));
    }

    #[test]
    fn single_quoted_literal_is_rejected() {
        let python_dict = "{'summary': 'x', 'key_points': ['a'], 'topics': ['t']}";
        assert!(parse_reply(python_dict, 500).is_err());
    }

    #[test]
    fn accepts_fenced_reply_with_chatter() {
        let reply = format!("```json\n{WELL_FORMED}\n```");
        let record = parse_reply(&reply, 500).expect("fenced JSON");
        assert_eq!(record.summary, "A walk through Rust ownership.");

        let chatty = format!("Here you go:\n{WELL_FORMED}\nHope this helps.");
        assert!(parse_reply(&chatty, 500).is_ok());
    }

    #[test]
    fn summary_never_exceeds_bound() {
        let long = "가".repeat(800);
        let reply = format!(r#"{{"summary": "{long}", "key_points": [], "topics": []}}"#);

        for max in [1, 50, 500, 799, 800] {
            let record = parse_reply(&reply, max).expect("valid shape");
            assert_eq!(record.summary.chars().count(), max);
        }
        let record = parse_reply(&reply, 1000).expect("valid shape");
        assert_eq!(record.summary.chars().count(), 800);
    }

    #[test]
    fn empty_lists_render_as_empty_strings() {
        let record =
            parse_reply(r#"{"summary": "s", "key_points": [], "topics": []}"#, 10).expect("valid");
        assert_eq!(record.key_points, "");
        assert_eq!(record.topics, "");
    }
}
