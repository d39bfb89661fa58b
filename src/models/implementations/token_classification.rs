//! BERT with a per-token classification head, as used by NER checkpoints
//! such as `dslim/bert-base-NER`.

use std::collections::HashMap;
use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::{linear, ops::softmax_last_dim, Linear, Module};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};

use crate::loaders::{ConfigLoader, ModelSource, TokenizerLoader, WeightsLoader};
use crate::pipelines::ner_pipeline::model::{NerModel, TokenPrediction};

#[derive(Debug, Deserialize)]
struct LabelConfig {
    id2label: HashMap<String, String>,
}

/// Turn the `{"0": "O", "1": "B-MISC", ...}` map into a dense label table.
fn label_table(id2label: HashMap<String, String>) -> anyhow::Result<Vec<String>> {
    let mut labels = id2label
        .into_iter()
        .map(|(id, label)| Ok((id.parse::<usize>()?, label)))
        .collect::<anyhow::Result<Vec<(usize, String)>>>()?;
    labels.sort_by_key(|(id, _)| *id);
    Ok(labels.into_iter().map(|(_, label)| label).collect())
}

#[derive(Clone)]
pub struct TokenClassificationModel {
    bert: Arc<BertModel>,
    classifier: Linear,
    labels: Arc<Vec<String>>,
    device: Device,
}

impl TokenClassificationModel {
    pub fn load(source: &ModelSource, device: Device) -> anyhow::Result<Self> {
        let config: Config = ConfigLoader::new(source, "config.json").load()?;
        let labels = label_table(ConfigLoader::new(source, "config.json").load::<LabelConfig>()?.id2label)?;

        let vb = WeightsLoader::new(source).load(DType::F32, &device)?;
        let bert = BertModel::load(vb.pp("bert"), &config)?;
        let classifier = linear(config.hidden_size, labels.len(), vb.pp("classifier"))?;
        tracing::debug!(%source, labels = labels.len(), "loaded token classifier");

        Ok(Self {
            bert: Arc::new(bert),
            classifier,
            labels: Arc::new(labels),
            device,
        })
    }

    pub fn tokenizer(source: &ModelSource) -> anyhow::Result<Tokenizer> {
        let config: Config = ConfigLoader::new(source, "config.json").load()?;
        let mut tokenizer = TokenizerLoader::new(source).load()?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_position_embeddings,
                ..Default::default()
            }))
            .map_err(anyhow::Error::msg)?;
        Ok(tokenizer)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Most likely label for every non-special token of `text`.
    pub fn predict(&self, tokenizer: &Tokenizer, text: &str) -> anyhow::Result<Vec<TokenPrediction>> {
        let encoding = tokenizer.encode(text, true).map_err(anyhow::Error::msg)?;
        if encoding.is_empty() {
            return Ok(Vec::new());
        }

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .bert
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let logits = self.classifier.forward(&hidden)?.squeeze(0)?;
        let probs = softmax_last_dim(&logits)?.to_vec2::<f32>()?;

        let special = encoding.get_special_tokens_mask();
        let offsets = encoding.get_offsets();
        let words = encoding.get_word_ids();

        let mut predictions = Vec::with_capacity(probs.len());
        for (i, row) in probs.iter().enumerate() {
            if special[i] == 1 {
                continue;
            }
            let Some((best, score)) = row
                .iter()
                .copied()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(&b.1))
            else {
                continue;
            };
            let label = self
                .labels
                .get(best)
                .cloned()
                .unwrap_or_else(|| format!("LABEL_{best}"));
            predictions.push(TokenPrediction {
                label,
                score,
                start: offsets[i].0,
                end: offsets[i].1,
                word: words[i],
            });
        }
        Ok(predictions)
    }
}

impl NerModel for TokenClassificationModel {
    type Options = ModelSource;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self> {
        Self::load(&options, device)
    }

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> anyhow::Result<Vec<TokenPrediction>> {
        TokenClassificationModel::predict(self, tokenizer, text)
    }

    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer> {
        Self::tokenizer(&options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
