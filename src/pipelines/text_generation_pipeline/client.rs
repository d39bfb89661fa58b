//! A small async client for the Ollama REST API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{CoachError, GenerationConfig, Message, OllamaConfig, Role};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl From<&GenerationConfig> for GenerateOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            stop: config.stop.clone(),
            temperature: config.temperature,
            seed: config.temperature.map(|_| config.seed),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    raw: bool,
    stream: bool,
    options: &'a GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// A function the model asked to have called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

/// A chat message as `/api/chat` sends and receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: *message.role(),
            content: message.content().to_string(),
            tool_calls: Vec::new(),
        }
    }
}

/// How a tool is advertised to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    pub fn function(name: &str, description: &str, parameters: serde_json::Value) -> Self {
        Self {
            kind: "function",
            function: FunctionDefinition {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolDefinition],
    stream: bool,
}

fn no_tools(tools: &&[ToolDefinition]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    model: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    status: String,
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    http: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// A client for the daemon named by `OLLAMA_HOST`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(OllamaConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.config.base_url)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> anyhow::Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "ollama request");
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoachError::Ollama {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(response.json().await?)
    }

    /// Complete `prompt`. With `raw` the prompt is sent without the model's own template.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        raw: bool,
        options: &GenerateOptions,
    ) -> anyhow::Result<String> {
        let request = GenerateRequest {
            model,
            prompt,
            raw,
            stream: false,
            options,
        };
        let response: GenerateResponse = self.post("generate", &request).await?;
        Ok(response.response)
    }

    /// One chat turn. The reply may contain tool calls instead of text.
    pub async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> anyhow::Result<ChatMessage> {
        let request = ChatRequest {
            model,
            messages,
            tools,
            stream: false,
        };
        let response: ChatResponse = self.post("chat", &request).await?;
        Ok(response.message)
    }

    pub async fn embed(&self, model: &str, prompt: &str) -> anyhow::Result<Vec<f32>> {
        let response: EmbeddingResponse = self
            .post("embeddings", &EmbeddingRequest { model, prompt })
            .await?;
        if response.embedding.is_empty() {
            return Err(CoachError::InvalidEmbeddings(format!("model '{model}' returned an empty embedding")).into());
        }
        Ok(response.embedding)
    }

    /// Download `model` into the daemon, returning the final status line.
    pub async fn pull(&self, model: &str) -> anyhow::Result<String> {
        tracing::info!(model, "pulling ollama model");
        let response: PullResponse = self
            .post("pull", &PullRequest { model, stream: false })
            .await?;
        Ok(response.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_request_shape() {
        let options = GenerateOptions::from(&GenerationConfig::llama3());
        let request = GenerateRequest {
            model: "llama3",
            prompt: "<|begin_of_text|>",
            raw: true,
            stream: false,
            options: &options,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "llama3",
                "prompt": "<|begin_of_text|>",
                "raw": true,
                "stream": false,
                "options": {"stop": ["<|eot_id|>"]}
            })
        );
    }

    #[test]
    fn seed_is_sent_only_when_sampling() {
        let config = GenerationConfig {
            temperature: Some(0.7),
            ..GenerationConfig::default()
        };
        let options = GenerateOptions::from(&config);
        assert_eq!(options.seed, Some(config.seed));
        assert_eq!(GenerateOptions::from(&GenerationConfig::default()).seed, None);
    }

    #[test]
    fn chat_request_advertises_tools() {
        let messages = [ChatMessage::from(&Message::user("weather?"))];
        let tools = [ToolDefinition::function(
            "get_the_weather",
            "Get the weather",
            json!({"type": "object"}),
        )];
        let request = ChatRequest {
            model: "llama3.1",
            messages: &messages,
            tools: &tools,
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "llama3.1",
                "messages": [{"role": "user", "content": "weather?"}],
                "tools": [{
                    "type": "function",
                    "function": {
                        "name": "get_the_weather",
                        "description": "Get the weather",
                        "parameters": {"type": "object"}
                    }
                }],
                "stream": false
            })
        );
    }

    #[test]
    fn chat_response_with_tool_calls() {
        let body = r#"{
            "model": "llama3.1",
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    {"function": {"name": "get_the_weather", "arguments": {"location": "Dayton, Ohio"}}}
                ]
            },
            "done": true
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.message.role, Role::Assistant);
        assert_eq!(response.message.tool_calls.len(), 1);
        assert_eq!(response.message.tool_calls[0].function.name, "get_the_weather");
        assert_eq!(
            response.message.tool_calls[0].function.arguments["location"],
            "Dayton, Ohio"
        );
    }

    #[test]
    fn embedding_response_parses() {
        let response: EmbeddingResponse =
            serde_json::from_str(r#"{"embedding": [0.5, -0.25]}"#).unwrap();
        assert_eq!(response.embedding, vec![0.5, -0.25]);
    }

    #[test]
    fn urls_hang_off_the_api_root() {
        let client = OllamaClient::new(OllamaConfig::new("http://gpu-box:11434/")).unwrap();
        assert_eq!(client.url("generate"), "http://gpu-box:11434/api/generate");
    }
}
