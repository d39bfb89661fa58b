pub mod cache;
pub mod config;
pub mod error;
pub mod message;

pub use cache::{global_cache, ModelCache, ModelOptions};
pub use config::{GenerationConfig, OllamaConfig};
pub use error::{CoachError, ToolError};
pub use message::{Message, Role};
