//! Extractive question answering.
//!
//! The model reads a question and a context passage and points at the span of
//! the context that answers the question.
//!
//! ```rust,no_run
//! use coach::pipelines::question_answering_pipeline::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = QuestionAnsweringPipelineBuilder::checkpoint("team_knowledge_base", "1500")
//!     .build()
//!     .await?;
//! let answer = pipeline.answer(
//!     "How many programming languages does BLOOM support?",
//!     "BLOOM has 176 billion parameters and can generate text in 46 languages natural languages and 13 programming languages.",
//! )?;
//! println!("{}", serde_json::to_string(&answer)?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::QuestionAnsweringPipelineBuilder;
pub use model::QuestionAnsweringModel;
pub use pipeline::{best_span, Answer, QuestionAnsweringPipeline, MAX_ANSWER_LEN};

pub use crate::models::implementations::DistilBertForQuestionAnswering;
pub use crate::pipelines::utils::DeviceSelectable;

pub use anyhow::Result;
