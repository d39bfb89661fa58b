use candle_core::Device;
use tokenizers::Tokenizer;

use crate::core::ModelOptions;

/// The winning label of one token and where that token sits in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPrediction {
    pub label: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
    /// Index of the word this token belongs to; shared by subword pieces.
    pub word: Option<u32>,
}

pub trait NerModel {
    type Options: std::fmt::Debug + Clone + Send + ModelOptions + 'static;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Predictions for every non-special token, in text order.
    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> anyhow::Result<Vec<TokenPrediction>>;

    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer>;

    fn device(&self) -> &Device;
}
