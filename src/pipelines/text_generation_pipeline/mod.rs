//! Text generation with models served by a local Ollama daemon.
//!
//! ```rust,no_run
//! use coach::pipelines::text_generation_pipeline::*;
//! use coach::Message;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = TextGenerationPipelineBuilder::ollama("llama3").build().await?;
//! let answer = pipeline
//!     .completion(&[
//!         Message::system("Give a one or two word answers only."),
//!         Message::user("What is capital of America?"),
//!     ])
//!     .await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod pipeline;
pub mod template;

pub use builder::{validate_model, TextGenerationPipelineBuilder};
pub use client::{ChatMessage, FunctionCall, GenerateOptions, OllamaClient, ToolCall, ToolDefinition};
pub use pipeline::TextGenerationPipeline;
pub use template::ChatTemplate;

pub use crate::core::{GenerationConfig, OllamaConfig};

pub use anyhow::Result;
