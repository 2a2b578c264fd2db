use async_openai::error::OpenAIError;
use yt_transcript_rs::errors::{CookieError, CouldNotRetrieveTranscript};

#[derive(Debug, derive_more::Display, derive_more::From, derive_more::Error)]
pub enum Error {
    #[display("{_0}")]
    #[from(ignore)]
    Custom(#[error(not(source))] String),

    #[display("Caption client setup failed: {_0}")]
    Cookie(CookieError),

    #[display("Caption service error: {_0}")]
    Captions(CouldNotRetrieveTranscript),

    #[display("OpenAI error: {_0}")]
    OpenAi(OpenAIError),

    #[display("JSON error: {_0}")]
    Json(serde_json::Error),

    /// No API key configured for the summarizer.
    #[display("OPENAI_API_KEY is not set; summarization needs an OpenAI API key")]
    #[from(ignore)]
    CredentialMissing,
}

impl Error {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with<E>(err: E) -> Result<()>
    where
        Error: From<E>,
    {
        Err(err)?
    }

    #[test]
    fn library_errors_convert() {
        let cookie = fails_with(CookieError::PathInvalid("cookies.txt".to_string())).unwrap_err();
        assert!(matches!(cookie, Error::Cookie(_)));
        assert!(cookie.to_string().starts_with("Caption client setup failed"));

        let captions = fails_with(CouldNotRetrieveTranscript {
            video_id: "vid".to_string(),
            reason: None,
        })
        .unwrap_err();
        assert!(matches!(captions, Error::Captions(_)));

        let json = fails_with(serde_json::from_str::<u32>("nope").unwrap_err()).unwrap_err();
        assert!(matches!(json, Error::Json(_)));

        let openai = fails_with(OpenAIError::InvalidArgument("model".to_string())).unwrap_err();
        assert!(matches!(openai, Error::OpenAi(_)));
    }

    #[test]
    fn credential_missing_names_the_variable() {
        assert!(Error::CredentialMissing.to_string().contains("OPENAI_API_KEY"));
    }
}
