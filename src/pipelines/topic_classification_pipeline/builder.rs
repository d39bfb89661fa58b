use super::pipeline::TopicClassificationPipeline;
use crate::loaders::ModelSource;
use crate::models::implementations::{
    SentenceEmbeddingModel, TopicModel, DEFAULT_EMBEDDING_MODEL,
};
use crate::pipelines::embedding_pipeline::EmbeddingPipelineBuilder;
use crate::pipelines::utils::{load_cached_model, DeviceRequest, DeviceSelectable};

pub struct TopicClassificationPipelineBuilder {
    topic_model: ModelSource,
    embedding_model: Option<String>,
    device_request: DeviceRequest,
}

impl TopicClassificationPipelineBuilder {
    pub fn new(topic_model: &str) -> Self {
        Self {
            topic_model: ModelSource::parse(topic_model),
            embedding_model: None,
            device_request: DeviceRequest::Default,
        }
    }

    /// Override the sentence encoder named in the topic model's config.
    pub fn embedding_model(mut self, model: &str) -> Self {
        self.embedding_model = Some(model.to_string());
        self
    }

    pub async fn build(self) -> anyhow::Result<TopicClassificationPipeline<SentenceEmbeddingModel>> {
        let source = self.topic_model.clone();
        let (topics, _) = load_cached_model(&self.topic_model, DeviceRequest::Cpu, move |_| {
            TopicModel::load(&source)
        })
        .await?;

        let embedding_model = self
            .embedding_model
            .or_else(|| topics.embedding_model())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        tracing::debug!(%embedding_model, "topic embedding model");

        let mut embedder = EmbeddingPipelineBuilder::sentence_transformer(&embedding_model);
        *embedder.device_request_mut() = self.device_request;
        let embedder = embedder.build().await?;

        Ok(TopicClassificationPipeline { embedder, topics })
    }
}

impl DeviceSelectable for TopicClassificationPipelineBuilder {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}
