use candle_core::Device;
use tokenizers::Tokenizer;

use crate::core::ModelOptions;

pub trait QuestionAnsweringModel {
    type Options: std::fmt::Debug + Clone + Send + ModelOptions + 'static;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Per-token start and end logits for one encoded question/context pair.
    fn span_logits(
        &self,
        input_ids: &[u32],
        attention_mask: &[u32],
    ) -> anyhow::Result<(Vec<f32>, Vec<f32>)>;

    /// Tokenizer configured to encode `(question, context)` pairs.
    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer>;

    fn device(&self) -> &Device;
}
