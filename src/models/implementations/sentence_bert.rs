//! Sentence-transformers encoders on top of Candle's BERT.
//!
//! A sentence-transformers repository is a plain BERT checkpoint plus a few
//! small JSON files describing how token states become one sentence vector:
//! `1_Pooling/config.json` (which pooling), `modules.json` (whether a
//! `Normalize` stage follows) and `sentence_bert_config.json` (maximum
//! sequence length).

use std::sync::Arc;

use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use crate::core::CoachError;
use crate::loaders::{ConfigLoader, ModelSource, TokenizerLoader, WeightsLoader};
use crate::pipelines::embedding_pipeline::model::EmbeddingModel;

/// How token embeddings are reduced to a sentence embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolingStrategy {
    /// Hidden state of the first (`[CLS]`) token.
    Cls,
    /// Average over non-padding tokens.
    #[default]
    Mean,
    /// Element-wise maximum over non-padding tokens.
    Max,
}

#[derive(Debug, Deserialize)]
struct PoolingConfig {
    #[serde(default)]
    pooling_mode_cls_token: bool,
    #[serde(default)]
    pooling_mode_mean_tokens: bool,
    #[serde(default)]
    pooling_mode_max_tokens: bool,
}

impl From<PoolingConfig> for PoolingStrategy {
    fn from(config: PoolingConfig) -> Self {
        if config.pooling_mode_cls_token {
            Self::Cls
        } else if config.pooling_mode_max_tokens && !config.pooling_mode_mean_tokens {
            Self::Max
        } else {
            Self::Mean
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModuleEntry {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct SentenceBertConfig {
    max_seq_length: Option<usize>,
}

/// A BERT-family sentence encoder such as `all-MiniLM-L6-v2`.
#[derive(Clone)]
pub struct SentenceEmbeddingModel {
    model: Arc<BertModel>,
    pooling: PoolingStrategy,
    normalize: bool,
    device: Device,
}

impl SentenceEmbeddingModel {
    pub fn load(source: &ModelSource, device: Device) -> anyhow::Result<Self> {
        let config: Config = ConfigLoader::new(source, "config.json").load()?;
        let vb = WeightsLoader::new(source).load(DType::F32, &device)?;
        let model = BertModel::load(vb, &config)?;

        let pooling = ConfigLoader::new(source, "1_Pooling/config.json")
            .load_optional::<PoolingConfig>()?
            .map(PoolingStrategy::from)
            .unwrap_or_default();
        let normalize = ConfigLoader::new(source, "modules.json")
            .load_optional::<Vec<ModuleEntry>>()?
            .is_some_and(|modules| modules.iter().any(|m| m.kind.ends_with(".Normalize")));

        tracing::debug!(%source, ?pooling, normalize, "loaded sentence encoder");

        Ok(Self {
            model: Arc::new(model),
            pooling,
            normalize,
            device,
        })
    }

    /// The encoder's tokenizer, padding to the longest batch member and
    /// truncating at the model's sequence limit.
    pub fn tokenizer(source: &ModelSource) -> anyhow::Result<Tokenizer> {
        let mut tokenizer = TokenizerLoader::new(source).load()?;

        let max_length = match ConfigLoader::new(source, "sentence_bert_config.json")
            .load_optional::<SentenceBertConfig>()?
            .and_then(|c| c.max_seq_length)
        {
            Some(len) => len,
            None => {
                let config: Config = ConfigLoader::new(source, "config.json").load()?;
                config.max_position_embeddings
            }
        };

        tokenizer
            .with_padding(Some(PaddingParams::default()))
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(anyhow::Error::msg)?;
        Ok(tokenizer)
    }

    pub fn pooling(&self) -> PoolingStrategy {
        self.pooling
    }

    pub fn normalizes(&self) -> bool {
        self.normalize
    }

    pub fn embed_batch(&self, tokenizer: &Tokenizer, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(anyhow::Error::msg)?;
        if let Some((text, _)) = texts
            .iter()
            .zip(&encodings)
            .find(|(_, encoding)| encoding.get_ids().is_empty())
        {
            return Err(CoachError::EmptyTokenization(text.to_string()).into());
        }

        let input_ids = encodings
            .iter()
            .map(|e| Tensor::new(e.get_ids(), &self.device))
            .collect::<candle_core::Result<Vec<_>>>()?;
        let attention_mask = encodings
            .iter()
            .map(|e| Tensor::new(e.get_attention_mask(), &self.device))
            .collect::<candle_core::Result<Vec<_>>>()?;
        let input_ids = Tensor::stack(&input_ids, 0)?;
        let attention_mask = Tensor::stack(&attention_mask, 0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = pool(&hidden, &attention_mask, self.pooling)?;
        let pooled = if self.normalize {
            l2_normalise(&pooled)?
        } else {
            pooled
        };

        Ok(pooled.to_vec2::<f32>()?)
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

/// Reduce `(batch, seq, hidden)` token states to `(batch, hidden)`, ignoring padding.
pub fn pool(hidden: &Tensor, attention_mask: &Tensor, strategy: PoolingStrategy) -> candle_core::Result<Tensor> {
    let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
    match strategy {
        PoolingStrategy::Cls => hidden.i((.., 0)),
        PoolingStrategy::Mean => {
            let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
            let counts = mask.sum(1)?;
            summed.broadcast_div(&counts)
        }
        PoolingStrategy::Max => {
            // Padding positions are pushed far below any real activation.
            let penalty = ((mask - 1.0)? * 1e9)?;
            hidden.broadcast_add(&penalty)?.max(1)
        }
    }
}

pub fn l2_normalise(t: &Tensor) -> candle_core::Result<Tensor> {
    let norm = t.sqr()?.sum_keepdim(D::Minus1)?.sqrt()?;
    t.broadcast_div(&norm)
}

impl EmbeddingModel for SentenceEmbeddingModel {
    type Options = ModelSource;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self> {
        Self::load(&options, device)
    }

    fn embed_batch(&self, tokenizer: &Tokenizer, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        SentenceEmbeddingModel::embed_batch(self, tokenizer, texts)
    }

    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer> {
        Self::tokenizer(&options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
