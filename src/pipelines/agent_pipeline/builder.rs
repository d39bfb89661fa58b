use std::sync::Arc;

use super::pipeline::{AgentPipeline, ChatBackend};
use super::tools::Tool;
use crate::core::OllamaConfig;
use crate::pipelines::text_generation_pipeline::OllamaClient;

pub const DEFAULT_MAX_ITERATIONS: usize = 5;

pub struct AgentPipelineBuilder {
    model: String,
    ollama: OllamaConfig,
    tools: Vec<Arc<dyn Tool>>,
    system_prompt: Option<String>,
    max_iterations: usize,
}

impl AgentPipelineBuilder {
    /// A tool-calling model served by Ollama, e.g. `llama3.1`.
    pub fn ollama(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ollama: OllamaConfig::from_env(),
            tools: Vec::new(),
            system_prompt: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    pub fn system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = Some(prompt.to_string());
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn ollama_config(mut self, config: OllamaConfig) -> Self {
        self.ollama = config;
        self
    }

    pub async fn build(self) -> anyhow::Result<AgentPipeline<OllamaClient>> {
        let client = OllamaClient::new(self.ollama.clone())?;
        self.build_with(client)
    }

    /// Assemble the agent around another chat backend.
    pub fn build_with<B: ChatBackend>(self, backend: B) -> anyhow::Result<AgentPipeline<B>> {
        if self.tools.is_empty() {
            anyhow::bail!("No tools registered. Add one with tool() first.");
        }
        Ok(AgentPipeline {
            backend,
            model: self.model,
            tools: self.tools,
            system_prompt: self.system_prompt,
            max_iterations: self.max_iterations,
        })
    }
}
