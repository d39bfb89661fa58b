use candle_core::Device;
use tokenizers::Tokenizer;

use crate::core::{GenerationConfig, ModelOptions};

/// Encoder-decoder models that rewrite a text into a shorter one.
pub trait SummarizationModel {
    type Options: std::fmt::Debug + Clone + Send + ModelOptions + 'static;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Generated token ids, excluding the decoder start and end tokens.
    fn generate(&self, input_ids: &[u32], config: &GenerationConfig) -> anyhow::Result<Vec<u32>>;

    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer>;

    fn device(&self) -> &Device;
}
