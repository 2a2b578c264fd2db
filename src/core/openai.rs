use crate::core::summarizer::ChatModel;
use crate::error::{Error, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        CreateResponseArgs, EasyInputMessageArgs, InputItem, InputParam, OutputItem,
        OutputMessageContent, Role,
    },
};

pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

#[derive(Clone)]
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChat {
    /// Fails up front when no API key is configured.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::CredentialMissing)?;

        Ok(Self {
            client: Client::with_config(OpenAIConfig::new().with_api_key(api_key)),
            model: model.into(),
        })
    }
}

impl ChatModel for OpenAiChat {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        let request = CreateResponseArgs::default()
            .model(self.model.as_str())
            .temperature(temperature)
            .input(InputParam::Items(vec![InputItem::EasyMessage(
                EasyInputMessageArgs::default()
                    .role(Role::User)
                    .content(prompt)
                    .build()?,
            )]))
            .build()?;

        let response = self.client.responses().create(request).await?;

        let mut content = String::new();
        for output in response.output {
            if let OutputItem::Message(out) = output {
                for c in out.content {
                    match c {
                        OutputMessageContent::OutputText(text) => content.push_str(&text.text),
                        other => tracing::debug!("Skipping non-text content: {other:?}"),
                    }
                }
            }
        }

        tracing::debug!(model = %self.model, reply_chars = content.chars().count(), "model replied");
        Ok(content)
    }
}
