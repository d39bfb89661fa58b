//! T5 for conditional generation, decoding greedily for summarization.

use std::sync::{Arc, Mutex};

use candle_core::{DType, Device, Tensor};
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::t5::{Config, T5ForConditionalGeneration};
use tokenizers::{Tokenizer, TruncationParams};

use crate::core::GenerationConfig;
use crate::loaders::{ConfigLoader, ModelSource, TokenizerLoader, WeightsLoader};
use crate::pipelines::summarization_pipeline::model::SummarizationModel;

/// Longest input the pretrained T5 checkpoints were trained with.
pub const MAX_SOURCE_LENGTH: usize = 512;

#[derive(Clone)]
pub struct T5Model {
    model: Arc<Mutex<T5ForConditionalGeneration>>,
    decoder_start_token_id: u32,
    eos_token_id: u32,
    use_cache: bool,
    device: Device,
}

impl T5Model {
    pub fn load(source: &ModelSource, device: Device) -> anyhow::Result<Self> {
        let config: Config = ConfigLoader::new(source, "config.json").load()?;
        let vb = WeightsLoader::new(source).load(DType::F32, &device)?;
        let model = T5ForConditionalGeneration::load(vb, &config)?;
        tracing::debug!(%source, "loaded T5 model");

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            decoder_start_token_id: config.decoder_start_token_id.unwrap_or(config.pad_token_id) as u32,
            eos_token_id: config.eos_token_id as u32,
            use_cache: config.use_cache,
            device,
        })
    }

    pub fn tokenizer(source: &ModelSource) -> anyhow::Result<Tokenizer> {
        let mut tokenizer = TokenizerLoader::new(source).load()?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SOURCE_LENGTH,
                ..Default::default()
            }))
            .map_err(anyhow::Error::msg)?;
        Ok(tokenizer)
    }

    /// Decode a target sequence for `input_ids`, without the start and end tokens.
    pub fn generate(&self, input_ids: &[u32], config: &GenerationConfig) -> anyhow::Result<Vec<u32>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| anyhow::anyhow!("T5 model lock poisoned"))?;
        model.clear_kv_cache();

        let sampling = match config.temperature {
            Some(temperature) if temperature > 0.0 => Sampling::All { temperature },
            _ => Sampling::ArgMax,
        };
        let mut logits_processor = LogitsProcessor::from_sampling(config.seed, sampling);

        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = model.encode(&input)?;

        // The decoder sequence starts with the start token and counts it
        // towards both length limits.
        let mut sequence = vec![self.decoder_start_token_id];
        let mut decoding = sequence.len() < config.max_length;
        while decoding {
            let decoder_input = if sequence.len() == 1 || !self.use_cache {
                Tensor::new(sequence.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                Tensor::new(&sequence[sequence.len() - 1..], &self.device)?.unsqueeze(0)?
            };
            let mut logits = model
                .decode(&decoder_input, &encoder_output)?
                .flatten_all()?
                .to_dtype(DType::F32)?
                .to_vec1::<f32>()?;
            mask_logits(&mut logits, &sequence, self.eos_token_id, config);

            let logits = Tensor::new(logits, &self.device)?;
            let next = logits_processor.sample(&logits)?;
            decoding = push_token(&mut sequence, next, self.eos_token_id, config.max_length);
        }

        model.clear_kv_cache();
        tracing::debug!(tokens = sequence.len() - 1, "generated summary");
        Ok(sequence.split_off(1))
    }
}

/// Suppress the tokens that may not follow `sequence`: anything repeating an
/// n-gram, and `eos_token_id` while the sequence is shorter than `min_length`.
pub fn mask_logits(logits: &mut [f32], sequence: &[u32], eos_token_id: u32, config: &GenerationConfig) {
    for token in banned_ngram_tokens(sequence, config.no_repeat_ngram_size) {
        if let Some(logit) = logits.get_mut(token as usize) {
            *logit = f32::NEG_INFINITY;
        }
    }
    if sequence.len() < config.min_length {
        if let Some(logit) = logits.get_mut(eos_token_id as usize) {
            *logit = f32::NEG_INFINITY;
        }
    }
}

/// Append `next` unless it ends the sequence. Returns whether decoding goes on.
pub fn push_token(sequence: &mut Vec<u32>, next: u32, eos_token_id: u32, max_length: usize) -> bool {
    if next == eos_token_id {
        return false;
    }
    sequence.push(next);
    sequence.len() < max_length
}

/// Tokens that would complete an n-gram of size `n` already present in `sequence`.
pub fn banned_ngram_tokens(sequence: &[u32], n: usize) -> Vec<u32> {
    if n == 0 || sequence.len() + 1 < n {
        return Vec::new();
    }
    let prefix = &sequence[sequence.len() + 1 - n..];
    let mut banned: Vec<u32> = sequence
        .windows(n)
        .filter(|window| &window[..n - 1] == prefix)
        .map(|window| window[n - 1])
        .collect();
    banned.sort_unstable();
    banned.dedup();
    banned
}

impl SummarizationModel for T5Model {
    type Options = ModelSource;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self> {
        Self::load(&options, device)
    }

    fn generate(&self, input_ids: &[u32], config: &GenerationConfig) -> anyhow::Result<Vec<u32>> {
        T5Model::generate(self, input_ids, config)
    }

    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer> {
        Self::tokenizer(&options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EOS: u32 = 1;

    fn config(min_length: usize, max_length: usize) -> GenerationConfig {
        GenerationConfig {
            min_length,
            max_length,
            no_repeat_ngram_size: 0,
            ..GenerationConfig::default()
        }
    }

    fn argmax(logits: &[f32]) -> u32 {
        logits
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i as u32)
            .unwrap()
    }

    /// Greedy decode where `eos` always has the highest raw logit.
    fn decode_eager_eos(config: &GenerationConfig) -> Vec<u32> {
        let mut sequence = vec![0];
        let mut decoding = sequence.len() < config.max_length;
        while decoding {
            let mut logits = vec![0.0, 10.0, 1.0, 2.0];
            mask_logits(&mut logits, &sequence, EOS, config);
            decoding = push_token(&mut sequence, argmax(&logits), EOS, config.max_length);
        }
        sequence
    }

    #[test]
    fn eos_is_masked_below_min_length() {
        let mut logits = vec![0.0, 10.0, 1.0];
        mask_logits(&mut logits, &[0, 3], EOS, &config(3, 200));
        assert_eq!(logits[EOS as usize], f32::NEG_INFINITY);
        assert_eq!(argmax(&logits), 2);
    }

    #[test]
    fn eos_is_allowed_once_min_length_is_reached() {
        let mut logits = vec![0.0, 10.0, 1.0];
        mask_logits(&mut logits, &[0, 3, 2], EOS, &config(3, 200));
        assert_eq!(logits[EOS as usize], 10.0);
    }

    #[test]
    fn min_length_counts_the_start_token() {
        // start + 2 generated tokens reaches min_length 3, then eos wins
        assert_eq!(decode_eager_eos(&config(3, 200)), vec![0, 3, 3]);
    }

    #[test]
    fn output_is_capped_at_max_length() {
        let sequence = decode_eager_eos(&config(50, 5));
        assert_eq!(sequence.len(), 5);
        assert!(!sequence.contains(&EOS));
    }

    #[test]
    fn eos_ends_decoding_without_being_kept() {
        let mut sequence = vec![0, 4];
        assert!(!push_token(&mut sequence, EOS, EOS, 200));
        assert_eq!(sequence, vec![0, 4]);
        assert!(push_token(&mut sequence, 5, EOS, 200));
        assert!(!push_token(&mut sequence, 6, EOS, 4));
        assert_eq!(sequence, vec![0, 4, 5, 6]);
    }

    #[test]
    fn bans_the_token_that_would_repeat_a_trigram() {
        // "a b c ... a b" must not be followed by "c" again.
        let sequence = [0, 5, 6, 7, 9, 5, 6];
        assert_eq!(banned_ngram_tokens(&sequence, 3), vec![7]);
    }

    #[test]
    fn collects_every_continuation() {
        let sequence = [1, 2, 3, 1, 2, 4, 1, 2];
        assert_eq!(banned_ngram_tokens(&sequence, 3), vec![3, 4]);
    }

    #[test]
    fn short_sequences_ban_nothing() {
        assert!(banned_ngram_tokens(&[0], 3).is_empty());
        assert!(banned_ngram_tokens(&[0, 1, 2, 0, 1], 0).is_empty());
    }

    #[test]
    fn unigram_bans_everything_seen() {
        assert_eq!(banned_ngram_tokens(&[4, 2, 4], 1), vec![2, 4]);
    }
}
