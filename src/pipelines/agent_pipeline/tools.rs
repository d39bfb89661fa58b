use async_trait::async_trait;

use crate::core::ToolError;
use crate::pipelines::text_generation_pipeline::ToolDefinition;

/// What the agent does once a tool has failed `max_retries` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStrategy {
    /// Abort the run with the tool's error.
    #[default]
    Fail,
    /// Hand `Error: ...` to the model as the tool result and carry on.
    ReturnToModel,
}

/// A function the model may call.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters(&self) -> serde_json::Value;

    async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError>;

    fn error_strategy(&self) -> ErrorStrategy {
        ErrorStrategy::Fail
    }

    /// Attempts before the error strategy applies.
    fn max_retries(&self) -> u32 {
        3
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(self.name(), self.description(), self.parameters())
    }
}
