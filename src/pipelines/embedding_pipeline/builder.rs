use super::model::EmbeddingModel;
use super::pipeline::EmbeddingPipeline;
use crate::loaders::ModelSource;
use crate::models::implementations::SentenceEmbeddingModel;
use crate::pipelines::utils::{load_cached_model, load_tokenizer, DeviceRequest, DeviceSelectable};

pub struct EmbeddingPipelineBuilder<M: EmbeddingModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: EmbeddingModel> EmbeddingPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
        }
    }

    pub async fn build(self) -> anyhow::Result<EmbeddingPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
    {
        let options = self.options.clone();
        let (model, _device) =
            load_cached_model(&self.options, self.device_request, |device| M::new(options, device))
                .await?;
        let options = self.options;
        let tokenizer = load_tokenizer(move || M::get_tokenizer(options)).await?;
        Ok(EmbeddingPipeline { model, tokenizer })
    }
}

impl<M: EmbeddingModel> DeviceSelectable for EmbeddingPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl EmbeddingPipelineBuilder<SentenceEmbeddingModel> {
    /// A sentence-transformers model from the hub or a local directory.
    pub fn sentence_transformer(model: &str) -> Self {
        Self::new(ModelSource::parse(model))
    }
}
