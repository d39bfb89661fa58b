use super::client::{GenerateOptions, OllamaClient};
use super::template::ChatTemplate;
use crate::core::{GenerationConfig, Message};

/// Chat completion against a model served by Ollama.
///
/// The conversation is rendered locally with the model's chat template and
/// sent in raw mode, so the prompt the model sees is exactly the rendered one.
#[derive(Debug, Clone)]
pub struct TextGenerationPipeline {
    pub(crate) client: OllamaClient,
    pub(crate) model: String,
    pub(crate) template: ChatTemplate,
    pub(crate) config: GenerationConfig,
}

impl TextGenerationPipeline {
    pub async fn completion(&self, messages: &[Message]) -> anyhow::Result<String> {
        let prompt = self.template.render(messages)?;
        tracing::trace!(%prompt, "rendered prompt");
        let options = GenerateOptions::from(&self.config);
        let response = self
            .client
            .generate(&self.model, &prompt, true, &options)
            .await?;
        Ok(response.trim().to_string())
    }

    /// Complete a single user message.
    pub async fn prompt(&self, text: &str) -> anyhow::Result<String> {
        self.completion(&[Message::user(text)]).await
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &OllamaClient {
        &self.client
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.config
    }
}
