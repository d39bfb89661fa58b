//! Similarity scoring, intent matching and a small persisted document index.
//!
//! The scoring helpers work on plain `Vec<f32>` rows so they can be used with
//! any embedding source; [`SemanticSearchPipeline`] wires them to an
//! [`EmbeddingPipeline`](crate::pipelines::embedding_pipeline::EmbeddingPipeline).

pub mod index;
pub mod intent;
pub mod pipeline;
pub mod similarity;

pub use index::DocumentIndex;
pub use intent::{IntentLibrary, IntentMatch};
pub use pipeline::SemanticSearchPipeline;
pub use similarity::{cos_sim, dot_score, rank, semantic_search, Hit};
