use super::model::EmbeddingModel;
use crate::core::CoachError;
use tokenizers::Tokenizer;

pub struct EmbeddingPipeline<M: EmbeddingModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: EmbeddingModel> EmbeddingPipeline<M> {
    pub fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| CoachError::EmptyTokenization(text.to_string()).into())
    }

    pub fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.model.embed_batch(&self.tokenizer, texts)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}
