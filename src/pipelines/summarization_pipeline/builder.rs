use super::model::SummarizationModel;
use super::pipeline::SummarizationPipeline;
use crate::core::GenerationConfig;
use crate::loaders::ModelSource;
use crate::models::implementations::T5Model;
use crate::pipelines::utils::{load_cached_model, load_tokenizer, DeviceRequest, DeviceSelectable};

pub struct SummarizationPipelineBuilder<M: SummarizationModel> {
    options: M::Options,
    config: GenerationConfig,
    device_request: DeviceRequest,
}

impl<M: SummarizationModel> SummarizationPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            config: GenerationConfig::summarization(),
            device_request: DeviceRequest::Default,
        }
    }

    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    pub fn no_repeat_ngram_size(mut self, size: usize) -> Self {
        self.config.no_repeat_ngram_size = size;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub async fn build(self) -> anyhow::Result<SummarizationPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
    {
        let options = self.options.clone();
        let (model, _device) =
            load_cached_model(&self.options, self.device_request, |device| M::new(options, device))
                .await?;
        let options = self.options;
        let tokenizer = load_tokenizer(move || M::get_tokenizer(options)).await?;
        Ok(SummarizationPipeline {
            model,
            tokenizer,
            config: self.config,
        })
    }
}

impl<M: SummarizationModel> DeviceSelectable for SummarizationPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl SummarizationPipelineBuilder<T5Model> {
    pub fn t5(source: ModelSource) -> Self {
        Self::new(source)
    }

    /// A fine-tuned checkpoint at `./{directory}/checkpoint-{checkpoint}/`.
    pub fn checkpoint(directory: &str, checkpoint: &str) -> Self {
        Self::new(ModelSource::checkpoint(directory, checkpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_summarization_preset() {
        let builder = SummarizationPipelineBuilder::t5(ModelSource::hub("google-t5/t5-small"));
        assert_eq!(builder.config, GenerationConfig::summarization());

        let builder = builder.max_length(64).min_length(8);
        assert_eq!(builder.config.max_length, 64);
        assert_eq!(builder.config.min_length, 8);
        assert_eq!(builder.config.no_repeat_ngram_size, 3);
    }
}
