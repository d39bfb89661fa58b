//! A tool-calling agent on top of Ollama's chat API.
//!
//! ```rust,no_run
//! use coach::pipelines::agent_pipeline::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let agent = AgentPipelineBuilder::ollama("llama3.1")
//!     .tool(WeatherLookupTool::new())
//!     .build()
//!     .await?;
//! let response = agent.run("Can you give me the weather in Dayton, Ohio?").await?;
//! println!("Response: {response}");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod pipeline;
pub mod tools;
pub mod weather;

pub use builder::{AgentPipelineBuilder, DEFAULT_MAX_ITERATIONS};
pub use pipeline::{AgentPipeline, ChatBackend};
pub use tools::{ErrorStrategy, Tool};
pub use weather::{city_from_location, WeatherLookupTool};

pub use crate::core::ToolError;

pub use anyhow::Result;
