use candle_core::Device;
use tokenizers::Tokenizer;

use crate::core::ModelOptions;

/// Trait for models that turn text into fixed-length vectors.
pub trait EmbeddingModel {
    type Options: std::fmt::Debug + Clone + Send + ModelOptions + 'static;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// One vector per input text, in input order.
    fn embed_batch(&self, tokenizer: &Tokenizer, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer>;

    fn device(&self) -> &Device;
}
