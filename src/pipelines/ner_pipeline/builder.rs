use super::model::NerModel;
use super::pipeline::NerPipeline;
use crate::loaders::ModelSource;
use crate::models::implementations::TokenClassificationModel;
use crate::pipelines::utils::{load_cached_model, load_tokenizer, DeviceRequest, DeviceSelectable};

pub struct NerPipelineBuilder<M: NerModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: NerModel> NerPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
        }
    }

    pub async fn build(self) -> anyhow::Result<NerPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
    {
        let options = self.options.clone();
        let (model, _device) =
            load_cached_model(&self.options, self.device_request, |device| M::new(options, device))
                .await?;
        let options = self.options;
        let tokenizer = load_tokenizer(move || M::get_tokenizer(options)).await?;
        Ok(NerPipeline { model, tokenizer })
    }
}

impl<M: NerModel> DeviceSelectable for NerPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl NerPipelineBuilder<TokenClassificationModel> {
    pub fn bert(model: &str) -> Self {
        Self::new(ModelSource::parse(model))
    }
}
