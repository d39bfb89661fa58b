use std::path::PathBuf;

use super::embedder::OllamaEmbedder;
use super::pipeline::{PromptTemplate, RetrievalPipeline};
use super::store::FactStore;
use crate::core::OllamaConfig;
use crate::pipelines::text_generation_pipeline::{OllamaClient, TextGenerationPipelineBuilder};

pub const DEFAULT_K: usize = 5;

pub struct RetrievalPipelineBuilder {
    db: PathBuf,
    collection: String,
    embedding_model: String,
    generation_model: String,
    ollama: OllamaConfig,
    k: usize,
}

impl RetrievalPipelineBuilder {
    pub fn new(db: impl Into<PathBuf>, collection: &str) -> Self {
        Self {
            db: db.into(),
            collection: collection.to_string(),
            embedding_model: "llama3".to_string(),
            generation_model: "llama3".to_string(),
            ollama: OllamaConfig::from_env(),
            k: DEFAULT_K,
        }
    }

    pub fn embedding_model(mut self, model: &str) -> Self {
        self.embedding_model = model.to_string();
        self
    }

    pub fn generation_model(mut self, model: &str) -> Self {
        self.generation_model = model.to_string();
        self
    }

    pub fn ollama_config(mut self, config: OllamaConfig) -> Self {
        self.ollama = config;
        self
    }

    /// Number of facts placed in the prompt.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub async fn build(self) -> anyhow::Result<RetrievalPipeline<OllamaEmbedder>> {
        let store = FactStore::open(&self.db, &self.collection)?;
        let embedder = OllamaEmbedder::new(OllamaClient::new(self.ollama.clone())?, &self.embedding_model);
        let generator = TextGenerationPipelineBuilder::ollama(&self.generation_model)
            .ollama_config(self.ollama)
            .build()
            .await?;
        Ok(RetrievalPipeline {
            store,
            embedder,
            generator,
            prompt: PromptTemplate::rag()?,
            k: self.k,
        })
    }
}
