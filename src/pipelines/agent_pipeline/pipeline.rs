use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::tools::{ErrorStrategy, Tool};
use crate::core::Message;
use crate::pipelines::text_generation_pipeline::{ChatMessage, OllamaClient, ToolCall, ToolDefinition};

/// One chat turn against some model server.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> anyhow::Result<ChatMessage>;
}

#[async_trait]
impl ChatBackend for OllamaClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> anyhow::Result<ChatMessage> {
        OllamaClient::chat(self, model, messages, tools).await
    }
}

/// Lets a chat model call tools until it can answer.
pub struct AgentPipeline<B: ChatBackend = OllamaClient> {
    pub(crate) backend: B,
    pub(crate) model: String,
    pub(crate) tools: Vec<Arc<dyn Tool>>,
    pub(crate) system_prompt: Option<String>,
    pub(crate) max_iterations: usize,
}

impl<B: ChatBackend> AgentPipeline<B> {
    /// Run `task` to completion and return the model's final answer.
    pub async fn run(&self, task: &str) -> anyhow::Result<String> {
        let mut messages = Vec::new();
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage::from(&Message::system(system)));
        }
        messages.push(ChatMessage::from(&Message::user(task)));

        let definitions: Vec<ToolDefinition> = self.tools.iter().map(|t| t.definition()).collect();

        for iteration in 0..self.max_iterations {
            let reply = self.backend.chat(&self.model, &messages, &definitions).await?;
            if reply.tool_calls.is_empty() {
                tracing::debug!(iteration, "agent finished");
                return Ok(reply.content.trim().to_string());
            }

            let calls = reply.tool_calls.clone();
            messages.push(reply);
            for call in &calls {
                let result = self.execute_tool_call(call).await?;
                tracing::info!(tool = %call.function.name, %result, "tool result");
                messages.push(ChatMessage::from(&Message::tool(&result)));
            }
        }

        anyhow::bail!(
            "agent gave no final answer within {} iterations",
            self.max_iterations
        )
    }

    /// Call the requested tool, retrying up to its `max_retries`.
    async fn execute_tool_call(&self, call: &ToolCall) -> anyhow::Result<String> {
        let name = &call.function.name;
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Tool '{name}' not found"))?;
        let arguments = decode_arguments(&call.function.arguments);

        let mut attempts = 0u32;
        loop {
            match tool.call(arguments.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempts += 1;
                    if attempts >= tool.max_retries() {
                        return match tool.error_strategy() {
                            ErrorStrategy::Fail => Err(e.into()),
                            ErrorStrategy::ReturnToModel => Ok(format!("Error: {e}")),
                        };
                    }
                    tracing::warn!(tool = %name, attempts, error = %e, "tool call failed, retrying");
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
            }
        }
    }

    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name())
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Some servers send the arguments object as a JSON string.
fn decode_arguments(arguments: &serde_json::Value) -> serde_json::Value {
    match arguments {
        serde_json::Value::String(s) => serde_json::from_str(s).unwrap_or_else(|_| arguments.clone()),
        other => other.clone(),
    }
}
