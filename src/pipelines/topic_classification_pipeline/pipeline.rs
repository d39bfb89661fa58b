use serde::Serialize;

use crate::models::implementations::TopicModel;
use crate::pipelines::embedding_pipeline::{EmbeddingModel, EmbeddingPipeline};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicPrediction {
    pub topic: i64,
    pub label: String,
    pub probability: f32,
}

/// Embeds a message and assigns it the closest topic.
pub struct TopicClassificationPipeline<M: EmbeddingModel> {
    pub(crate) embedder: EmbeddingPipeline<M>,
    pub(crate) topics: TopicModel,
}

impl<M: EmbeddingModel> TopicClassificationPipeline<M> {
    pub fn classify(&self, text: &str) -> anyhow::Result<TopicPrediction> {
        let embedding = self.embedder.embed(text)?;
        let (topic, probability) = self.topics.transform(&embedding)?;
        Ok(TopicPrediction {
            topic,
            label: self.topics.label(topic).to_string(),
            probability,
        })
    }

    pub fn topic_model(&self) -> &TopicModel {
        &self.topics
    }

    pub fn embedder(&self) -> &EmbeddingPipeline<M> {
        &self.embedder
    }
}
