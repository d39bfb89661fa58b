pub mod bertopic;
pub mod distilbert;
pub mod sentence_bert;
pub mod t5;
pub mod token_classification;

pub use bertopic::{TopicModel, DEFAULT_EMBEDDING_MODEL};
pub use distilbert::DistilBertForQuestionAnswering;
pub use sentence_bert::{PoolingStrategy, SentenceEmbeddingModel};
pub use t5::T5Model;
pub use token_classification::TokenClassificationModel;
