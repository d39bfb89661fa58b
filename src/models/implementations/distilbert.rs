//! DistilBERT encoder with an extractive question-answering head.
//!
//! This is the architecture `AutoModelForQuestionAnswering` produces from
//! `distilbert/distilbert-base-uncased`: six post-LayerNorm transformer
//! blocks followed by a two-logit span classifier (`qa_outputs`).

use std::sync::Arc;

use candle_core::{DType, Device, IndexOp, Result, Tensor};
use candle_nn::{embedding, layer_norm, linear, ops::softmax_last_dim, Embedding, LayerNorm, Linear, Module, VarBuilder};
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams, TruncationStrategy};

use crate::loaders::{ConfigLoader, ModelSource, TokenizerLoader, WeightsLoader};
use crate::pipelines::question_answering_pipeline::model::QuestionAnsweringModel;

const LAYER_NORM_EPS: f64 = 1e-12;

/// Longest question + context the fine-tuned checkpoints were trained on.
pub const MAX_QA_LENGTH: usize = 384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Gelu,
    Relu,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub vocab_size: usize,
    pub dim: usize,
    pub n_layers: usize,
    pub n_heads: usize,
    pub hidden_dim: usize,
    pub max_position_embeddings: usize,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Debug, Clone)]
struct Embeddings {
    word_embeddings: Embedding,
    position_embeddings: Embedding,
    layer_norm: LayerNorm,
}

impl Embeddings {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        Ok(Self {
            word_embeddings: embedding(config.vocab_size, config.dim, vb.pp("word_embeddings"))?,
            position_embeddings: embedding(
                config.max_position_embeddings,
                config.dim,
                vb.pp("position_embeddings"),
            )?,
            layer_norm: layer_norm(config.dim, LAYER_NORM_EPS, vb.pp("LayerNorm"))?,
        })
    }

    fn forward(&self, input_ids: &Tensor) -> Result<Tensor> {
        let seq_len = input_ids.dim(1)?;
        let positions = Tensor::arange(0u32, seq_len as u32, input_ids.device())?.unsqueeze(0)?;
        let words = self.word_embeddings.forward(input_ids)?;
        let positions = self.position_embeddings.forward(&positions)?;
        self.layer_norm.forward(&words.broadcast_add(&positions)?)
    }
}

#[derive(Debug, Clone)]
struct MultiHeadSelfAttention {
    q_lin: Linear,
    k_lin: Linear,
    v_lin: Linear,
    out_lin: Linear,
    n_heads: usize,
    head_dim: usize,
}

impl MultiHeadSelfAttention {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let dim = config.dim;
        Ok(Self {
            q_lin: linear(dim, dim, vb.pp("q_lin"))?,
            k_lin: linear(dim, dim, vb.pp("k_lin"))?,
            v_lin: linear(dim, dim, vb.pp("v_lin"))?,
            out_lin: linear(dim, dim, vb.pp("out_lin"))?,
            n_heads: config.n_heads,
            head_dim: dim / config.n_heads,
        })
    }

    /// `mask` is additive, shaped `(batch, 1, 1, seq)`.
    fn forward(&self, xs: &Tensor, mask: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, dim) = xs.dims3()?;
        let heads = |t: Tensor| -> Result<Tensor> {
            t.reshape((batch, seq_len, self.n_heads, self.head_dim))?
                .transpose(1, 2)?
                .contiguous()
        };

        let q = (heads(self.q_lin.forward(xs)?)? / (self.head_dim as f64).sqrt())?;
        let k = heads(self.k_lin.forward(xs)?)?;
        let v = heads(self.v_lin.forward(xs)?)?;

        let scores = q.matmul(&k.t()?)?.broadcast_add(mask)?;
        let weights = softmax_last_dim(&scores)?;
        let context = weights
            .matmul(&v)?
            .transpose(1, 2)?
            .reshape((batch, seq_len, dim))?;
        self.out_lin.forward(&context)
    }
}

#[derive(Debug, Clone)]
struct FeedForward {
    lin1: Linear,
    lin2: Linear,
    activation: Activation,
}

impl FeedForward {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        Ok(Self {
            lin1: linear(config.dim, config.hidden_dim, vb.pp("lin1"))?,
            lin2: linear(config.hidden_dim, config.dim, vb.pp("lin2"))?,
            activation: config.activation,
        })
    }
}

impl Module for FeedForward {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let xs = self.lin1.forward(xs)?;
        let xs = match self.activation {
            Activation::Gelu => xs.gelu_erf()?,
            Activation::Relu => xs.relu()?,
        };
        self.lin2.forward(&xs)
    }
}

#[derive(Debug, Clone)]
struct TransformerBlock {
    attention: MultiHeadSelfAttention,
    sa_layer_norm: LayerNorm,
    ffn: FeedForward,
    output_layer_norm: LayerNorm,
}

impl TransformerBlock {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        Ok(Self {
            attention: MultiHeadSelfAttention::load(vb.pp("attention"), config)?,
            sa_layer_norm: layer_norm(config.dim, LAYER_NORM_EPS, vb.pp("sa_layer_norm"))?,
            ffn: FeedForward::load(vb.pp("ffn"), config)?,
            output_layer_norm: layer_norm(config.dim, LAYER_NORM_EPS, vb.pp("output_layer_norm"))?,
        })
    }

    fn forward(&self, xs: &Tensor, mask: &Tensor) -> Result<Tensor> {
        let attended = (self.attention.forward(xs, mask)? + xs)?;
        let attended = self.sa_layer_norm.forward(&attended)?;
        let output = (self.ffn.forward(&attended)? + &attended)?;
        self.output_layer_norm.forward(&output)
    }
}

/// The bare DistilBERT encoder.
#[derive(Debug, Clone)]
pub struct DistilBertModel {
    embeddings: Embeddings,
    layers: Vec<TransformerBlock>,
}

impl DistilBertModel {
    pub fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let embeddings = Embeddings::load(vb.pp("embeddings"), config)?;
        let layers_vb = vb.pp("transformer").pp("layer");
        let layers = (0..config.n_layers)
            .map(|i| TransformerBlock::load(layers_vb.pp(i), config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { embeddings, layers })
    }

    /// `attention_mask` is `(batch, seq)` with 1 for real tokens and 0 for padding.
    pub fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let mask = ((attention_mask.to_dtype(DType::F32)? - 1.0)? * 1e9)?
            .unsqueeze(1)?
            .unsqueeze(1)?;
        let mut hidden = self.embeddings.forward(input_ids)?;
        for layer in &self.layers {
            hidden = layer.forward(&hidden, &mask)?;
        }
        Ok(hidden)
    }
}

/// DistilBERT with the span head used for extractive question answering.
#[derive(Clone)]
pub struct DistilBertForQuestionAnswering {
    encoder: Arc<DistilBertModel>,
    qa_outputs: Linear,
    device: Device,
}

impl DistilBertForQuestionAnswering {
    pub fn load(source: &ModelSource, device: Device) -> anyhow::Result<Self> {
        let config: Config = ConfigLoader::new(source, "config.json").load()?;
        let vb = WeightsLoader::new(source).load(DType::F32, &device)?;
        let encoder = DistilBertModel::load(vb.pp("distilbert"), &config)?;
        let qa_outputs = linear(config.dim, 2, vb.pp("qa_outputs"))?;
        tracing::debug!(%source, layers = config.n_layers, "loaded question answering model");
        Ok(Self {
            encoder: Arc::new(encoder),
            qa_outputs,
            device,
        })
    }

    /// Tokenizer that truncates only the context once the pair exceeds [`MAX_QA_LENGTH`].
    pub fn tokenizer(source: &ModelSource) -> anyhow::Result<Tokenizer> {
        let mut tokenizer = TokenizerLoader::new(source).load()?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_QA_LENGTH,
                strategy: TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(anyhow::Error::msg)?;
        Ok(tokenizer)
    }

    /// Start and end logits for every token of a single sequence.
    pub fn span_logits(&self, input_ids: &[u32], attention_mask: &[u32]) -> anyhow::Result<(Vec<f32>, Vec<f32>)> {
        let input_ids = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(attention_mask, &self.device)?.unsqueeze(0)?;
        let hidden = self.encoder.forward(&input_ids, &attention_mask)?;
        let logits = self.qa_outputs.forward(&hidden)?.squeeze(0)?;
        let start = logits.i((.., 0))?.to_vec1::<f32>()?;
        let end = logits.i((.., 1))?.to_vec1::<f32>()?;
        Ok((start, end))
    }
}

impl QuestionAnsweringModel for DistilBertForQuestionAnswering {
    type Options = ModelSource;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self> {
        Self::load(&options, device)
    }

    fn span_logits(&self, input_ids: &[u32], attention_mask: &[u32]) -> anyhow::Result<(Vec<f32>, Vec<f32>)> {
        DistilBertForQuestionAnswering::span_logits(self, input_ids, attention_mask)
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
    use candle_nn::VarMap;

    fn tiny_config() -> Config {
        serde_json::from_str(
            r#"{
                "vocab_size": 16,
                "dim": 8,
                "n_layers": 2,
                "n_heads": 2,
                "hidden_dim": 12,
                "max_position_embeddings": 32,
                "activation": "gelu",
                "qa_dropout": 0.1
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn config_parses_hub_layout() {
        let config = tiny_config();
        assert_eq!(config.n_heads, 2);
        assert_eq!(config.activation, Activation::Gelu);
    }

    #[test]
    fn encoder_keeps_sequence_shape() {
        let config = tiny_config();
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let model = DistilBertModel::load(vb, &config).unwrap();

        let input_ids = Tensor::new(&[[1u32, 5, 7, 2, 0]], &Device::Cpu).unwrap();
        let mask = Tensor::new(&[[1u32, 1, 1, 1, 0]], &Device::Cpu).unwrap();
        let hidden = model.forward(&input_ids, &mask).unwrap();
        assert_eq!(hidden.dims(), &[1, 5, 8]);
    }
}
