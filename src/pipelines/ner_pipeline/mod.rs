//! Named-entity recognition with BERT token classifiers.
//!
//! ```rust,no_run
//! use coach::pipelines::ner_pipeline::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = NerPipelineBuilder::bert("dslim/bert-base-NER").build().await?;
//! for entity in pipeline.extract("Michael Jordan played for the Chicago Bulls.")? {
//!     println!("{:.3} {} {}", entity.score, entity.label, entity.span);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::NerPipelineBuilder;
pub use model::{NerModel, TokenPrediction};
pub use pipeline::{aggregate_entities, Entity, NerPipeline};

pub use crate::models::implementations::TokenClassificationModel;
pub use crate::pipelines::utils::DeviceSelectable;

pub use anyhow::Result;
