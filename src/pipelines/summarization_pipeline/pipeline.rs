use tokenizers::Tokenizer;

use super::model::SummarizationModel;
use crate::core::{CoachError, GenerationConfig};

pub const TASK_PREFIX: &str = "summarize: ";

/// Prefix `text` with the T5 summarization task marker unless it already has it.
pub fn with_task_prefix(text: &str) -> String {
    if text.starts_with(TASK_PREFIX) {
        text.to_string()
    } else {
        format!("{TASK_PREFIX}{text}")
    }
}

pub struct SummarizationPipeline<M: SummarizationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) config: GenerationConfig,
}

impl<M: SummarizationModel> SummarizationPipeline<M> {
    /// Summarise `text`. `None` when the model produced nothing printable.
    pub fn summarize(&self, text: &str) -> anyhow::Result<Option<String>> {
        let prompt = with_task_prefix(text);
        let encoding = self
            .tokenizer
            .encode(prompt.as_str(), true)
            .map_err(anyhow::Error::msg)?;
        if encoding.is_empty() {
            return Err(CoachError::EmptyTokenization(text.to_string()).into());
        }

        let output = self.model.generate(encoding.get_ids(), &self.config)?;
        let summary = self
            .tokenizer
            .decode(&output, true)
            .map_err(anyhow::Error::msg)?;
        let summary = summary.trim();
        Ok((!summary.is_empty()).then(|| summary.to_string()))
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}
