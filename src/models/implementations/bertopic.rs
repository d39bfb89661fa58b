//! BERTopic models saved with `serialization="safetensors"`.
//!
//! Such a repository carries no clustering model. Prediction compares a
//! document embedding with every topic embedding and picks the closest,
//! which is what BERTopic itself does after loading one.

use std::collections::HashMap;

use candle_core::{DType, Device};
use serde::Deserialize;

use crate::core::CoachError;
use crate::loaders::{ConfigLoader, ModelSource};
use crate::pipelines::semantic_search::cos_sim;

pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

#[derive(Debug, Deserialize)]
struct TopicsFile {
    #[serde(default)]
    topic_labels: HashMap<String, String>,
    #[serde(default)]
    custom_labels: Option<Vec<String>>,
    #[serde(rename = "_outliers", default)]
    outliers: i64,
}

#[derive(Debug, Deserialize)]
struct TopicConfig {
    embedding_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TopicModel {
    topic_embeddings: Vec<Vec<f32>>,
    topic_labels: HashMap<i64, String>,
    custom_labels: Option<Vec<String>>,
    outliers: i64,
    embedding_model: Option<String>,
}

impl TopicModel {
    pub fn new(
        topic_embeddings: Vec<Vec<f32>>,
        topic_labels: HashMap<i64, String>,
        custom_labels: Option<Vec<String>>,
        outliers: i64,
    ) -> Self {
        Self {
            topic_embeddings,
            topic_labels,
            custom_labels,
            outliers,
            embedding_model: None,
        }
    }

    pub fn load(source: &ModelSource) -> anyhow::Result<Self> {
        let topics: TopicsFile = ConfigLoader::new(source, "topics.json").load()?;
        let config = ConfigLoader::new(source, "config.json").load_optional::<TopicConfig>()?;

        let path = source.get("topic_embeddings.safetensors")?;
        let tensors = candle_core::safetensors::load(&path, &Device::Cpu)?;
        let topic_embeddings = tensors
            .get("topic_embeddings")
            .ok_or_else(|| {
                CoachError::InvalidEmbeddings(format!("{} has no 'topic_embeddings' tensor", path.display()))
            })?
            .to_dtype(DType::F32)?
            .to_vec2::<f32>()?;

        let topic_labels = topics
            .topic_labels
            .into_iter()
            .filter_map(|(id, label)| match id.parse::<i64>() {
                Ok(id) => Some((id, label)),
                Err(_) => {
                    tracing::warn!(id, "skipping topic label with non-numeric id");
                    None
                }
            })
            .collect();

        tracing::debug!(%source, topics = topic_embeddings.len(), "loaded topic model");
        Ok(Self {
            topic_embeddings,
            topic_labels,
            custom_labels: topics.custom_labels,
            outliers: topics.outliers,
            embedding_model: config.and_then(|c| c.embedding_model),
        })
    }

    /// The sentence encoder the topics were fitted with, as a hub repository id.
    pub fn embedding_model(&self) -> Option<String> {
        self.embedding_model.as_deref().map(|name| {
            if name.contains('/') {
                name.to_string()
            } else {
                format!("sentence-transformers/{name}")
            }
        })
    }

    pub fn num_topics(&self) -> usize {
        self.topic_embeddings.len()
    }

    /// Closest topic to `embedding` and its cosine similarity.
    pub fn transform(&self, embedding: &[f32]) -> anyhow::Result<(i64, f32)> {
        let similarities = cos_sim(embedding, &self.topic_embeddings)?;
        let (index, probability) = similarities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| CoachError::InvalidEmbeddings("topic model has no topics".into()))?;
        Ok((index as i64 - self.outliers, probability))
    }

    /// Custom label when one was set, otherwise the generated one.
    pub fn label(&self, topic: i64) -> &str {
        let custom = usize::try_from(topic + self.outliers)
            .ok()
            .and_then(|i| self.custom_labels.as_ref()?.get(i));
        custom
            .or_else(|| self.topic_labels.get(&topic))
            .map_or("unknown", String::as_str)
    }
}
