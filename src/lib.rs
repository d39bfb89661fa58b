pub mod core;
pub mod loaders;
pub mod models;
pub mod pipelines;

pub use core::{CoachError, GenerationConfig, Message, OllamaConfig, Role, ToolError};
pub use loaders::ModelSource;

pub use models::implementations::{
    DistilBertForQuestionAnswering, SentenceEmbeddingModel, T5Model, TokenClassificationModel,
    TopicModel,
};
