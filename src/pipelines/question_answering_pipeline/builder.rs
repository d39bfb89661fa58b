use super::model::QuestionAnsweringModel;
use super::pipeline::QuestionAnsweringPipeline;
use crate::loaders::ModelSource;
use crate::models::implementations::DistilBertForQuestionAnswering;
use crate::pipelines::utils::{load_cached_model, load_tokenizer, DeviceRequest, DeviceSelectable};

pub struct QuestionAnsweringPipelineBuilder<M: QuestionAnsweringModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: QuestionAnsweringModel> QuestionAnsweringPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
        }
    }

    pub async fn build(self) -> anyhow::Result<QuestionAnsweringPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
    {
        let options = self.options.clone();
        let (model, _device) =
            load_cached_model(&self.options, self.device_request, |device| M::new(options, device))
                .await?;
        let options = self.options;
        let tokenizer = load_tokenizer(move || M::get_tokenizer(options)).await?;
        Ok(QuestionAnsweringPipeline { model, tokenizer })
    }
}

impl<M: QuestionAnsweringModel> DeviceSelectable for QuestionAnsweringPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl QuestionAnsweringPipelineBuilder<DistilBertForQuestionAnswering> {
    pub fn distilbert(source: ModelSource) -> Self {
        Self::new(source)
    }

    /// A fine-tuned checkpoint at `./{directory}/checkpoint-{checkpoint}/`.
    pub fn checkpoint(directory: &str, checkpoint: &str) -> Self {
        Self::new(ModelSource::checkpoint(directory, checkpoint))
    }
}
