//! Topic classification with BERTopic.
//!
//! ```rust,no_run
//! use coach::pipelines::topic_classification_pipeline::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = TopicClassificationPipelineBuilder::new("MaartenGr/BERTopic_Wikipedia")
//!     .build()
//!     .await?;
//! let prediction = pipeline.classify("Can you zoom in on the player's shoes?")?;
//! println!("{} {}", prediction.label, prediction.probability);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod pipeline;

pub use builder::TopicClassificationPipelineBuilder;
pub use pipeline::{TopicClassificationPipeline, TopicPrediction};

pub use crate::models::implementations::TopicModel;
pub use crate::pipelines::utils::DeviceSelectable;

pub use anyhow::Result;
