//! Task pipelines.
//!
//! Every pipeline is created through a builder that resolves the model source
//! and the device, loads the model through the process-wide cache and
//! returns a ready-to-use pipeline.

pub mod agent_pipeline;
pub mod embedding_pipeline;
pub mod ner_pipeline;
pub mod question_answering_pipeline;
pub mod retrieval_pipeline;
pub mod semantic_search;
pub mod summarization_pipeline;
pub mod text_generation_pipeline;
pub mod topic_classification_pipeline;
pub mod utils;
