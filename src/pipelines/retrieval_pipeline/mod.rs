//! Retrieval-augmented generation over a small fact collection.
//!
//! Facts are embedded with an Ollama model and kept in a JSON file. A
//! question retrieves the nearest facts, which are pasted into the prompt of a
//! Llama 3 completion.
//!
//! ```rust,no_run
//! use coach::pipelines::retrieval_pipeline::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = RetrievalPipelineBuilder::new("team_facts.db", "michael_jordan_facts")
//!     .build()
//!     .await?;
//! let response = pipeline.invoke("What is Michael Jordan known for?").await?;
//! println!("{}", response.answer);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod embedder;
pub mod pipeline;
pub mod store;

pub use builder::{RetrievalPipelineBuilder, DEFAULT_K};
pub use embedder::{Embedder, OllamaEmbedder};
pub use pipeline::{PromptTemplate, RetrievalPipeline, RetrievalResponse, RAG_TEMPLATE};
pub use store::{FactRecord, FactStore};

pub use anyhow::Result;
