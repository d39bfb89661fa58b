//! Abstractive summarization with T5.
//!
//! ```rust,no_run
//! use coach::pipelines::summarization_pipeline::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = SummarizationPipelineBuilder::checkpoint("team_legal", "2000")
//!     .build()
//!     .await?;
//! match pipeline.summarize("The bill amends the Energy Policy Act of 2005.")? {
//!     Some(summary) => println!("{summary}"),
//!     None => println!("no summary found"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::SummarizationPipelineBuilder;
pub use model::SummarizationModel;
pub use pipeline::{with_task_prefix, SummarizationPipeline, TASK_PREFIX};

pub use crate::core::GenerationConfig;
pub use crate::models::implementations::T5Model;
pub use crate::pipelines::utils::DeviceSelectable;

pub use anyhow::Result;
