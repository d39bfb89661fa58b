//! Sentence embeddings.
//!
//! ```rust,no_run
//! use coach::pipelines::embedding_pipeline::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline =
//!     EmbeddingPipelineBuilder::sentence_transformer("sentence-transformers/all-MiniLM-L6-v2")
//!         .build()
//!         .await?;
//! let embedding = pipeline.embed("Take a 3 point shot")?;
//! assert_eq!(embedding.len(), 384);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::EmbeddingPipelineBuilder;
pub use model::EmbeddingModel;
pub use pipeline::EmbeddingPipeline;

pub use crate::models::implementations::{PoolingStrategy, SentenceEmbeddingModel};
pub use crate::pipelines::utils::DeviceSelectable;

pub use anyhow::Result;
