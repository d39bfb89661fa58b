use std::path::PathBuf;

use thiserror::Error;

/// Domain failures raised by the loaders and pipelines.
///
/// Pipelines return `anyhow::Result`; these variants are what ends up inside
/// when the failure is ours rather than a library's.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Unsupported model '{model}'. Choose one of: {}", supported.join(", "))]
    UnsupportedModel {
        model: String,
        supported: Vec<String>,
    },

    #[error("required file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("tokenizer produced an empty token sequence for '{0}'")]
    EmptyTokenization(String),

    #[error("malformed embeddings: {0}")]
    InvalidEmbeddings(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("ollama request failed (status {status}): {message}")]
    Ollama { status: u16, message: String },
}

/// Generic error type returned by any tool function.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A domain-specific failure, message chosen by the tool author.
    #[error("{0}")]
    Message(String),

    /// The caller supplied malformed parameters (wrong type, missing fields, etc.).
    #[error("parameter decoding failed: {0}")]
    Format(String),

    /// The tool could not reach the service it wraps.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_model_lists_choices() {
        let err = CoachError::UnsupportedModel {
            model: "mistral".into(),
            supported: vec!["llama3".into(), "llama3:8b".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported model 'mistral'. Choose one of: llama3, llama3:8b"
        );
    }
}
