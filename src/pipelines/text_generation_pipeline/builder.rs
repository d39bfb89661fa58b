use super::client::OllamaClient;
use super::pipeline::TextGenerationPipeline;
use super::template::ChatTemplate;
use crate::core::{CoachError, GenerationConfig, OllamaConfig};

pub struct TextGenerationPipelineBuilder {
    model: String,
    supported_models: Option<Vec<String>>,
    config: GenerationConfig,
    ollama: OllamaConfig,
    template: Option<ChatTemplate>,
}

impl TextGenerationPipelineBuilder {
    /// A Llama 3 family model served by Ollama.
    pub fn ollama(model: &str) -> Self {
        Self {
            model: model.to_string(),
            supported_models: None,
            config: GenerationConfig::llama3(),
            ollama: OllamaConfig::from_env(),
            template: None,
        }
    }

    /// Refuse to build for any model outside `models`.
    pub fn supported_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_models = Some(models.into_iter().map(Into::into).collect());
        self
    }

    pub fn ollama_config(mut self, config: OllamaConfig) -> Self {
        self.ollama = config;
        self
    }

    pub fn host(mut self, base_url: &str) -> Self {
        self.ollama = OllamaConfig::new(base_url).with_timeout(self.ollama.timeout);
        self
    }

    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn template(mut self, template: ChatTemplate) -> Self {
        self.template = Some(template);
        self
    }

    pub async fn build(self) -> anyhow::Result<TextGenerationPipeline> {
        if let Some(supported) = &self.supported_models {
            validate_model(&self.model, supported)?;
        }
        let template = match self.template {
            Some(template) => template,
            None => ChatTemplate::llama3()?,
        };
        let client = OllamaClient::new(self.ollama)?;
        tracing::debug!(model = %self.model, host = client.base_url(), "text generation pipeline ready");
        Ok(TextGenerationPipeline {
            client,
            model: self.model,
            template,
            config: self.config,
        })
    }
}

/// Fail with [`CoachError::UnsupportedModel`] unless `model` is listed in `supported`.
pub fn validate_model(model: &str, supported: &[String]) -> Result<(), CoachError> {
    if supported.iter().any(|m| m == model) {
        Ok(())
    } else {
        Err(CoachError::UnsupportedModel {
            model: model.to_string(),
            supported: supported.to_vec(),
        })
    }
}
