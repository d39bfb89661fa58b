use std::time::Duration;

/// Decoding knobs shared by local seq2seq generation and Ollama requests.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Upper bound on generated tokens.
    pub max_length: usize,
    /// End-of-sequence is suppressed until this many tokens were generated.
    pub min_length: usize,
    /// Forbid repeating any n-gram of this size. `0` disables the check.
    pub no_repeat_ngram_size: usize,
    /// `None` decodes greedily.
    pub temperature: Option<f64>,
    pub seed: u64,
    pub stop: Vec<String>,
}

impl GenerationConfig {
    /// The t5-small summarization preset, minus beam search.
    pub fn summarization() -> Self {
        Self {
            max_length: 200,
            min_length: 30,
            no_repeat_ngram_size: 3,
            ..Self::default()
        }
    }

    /// Llama 3 stops on its end-of-turn marker.
    pub fn llama3() -> Self {
        Self {
            stop: vec!["<|eot_id|>".to_string()],
            ..Self::default()
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_length: 512,
            min_length: 0,
            no_repeat_ngram_size: 0,
            temperature: None,
            seed: 299792458,
            stop: Vec::new(),
        }
    }
}

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Where the Ollama daemon lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl OllamaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Accepts a bare `host:port` the way the Ollama CLI does.
    pub fn from_host(host: &str) -> Self {
        Self::new(normalize_host(host.trim()))
    }

    /// Read `OLLAMA_HOST`, falling back to the local default.
    pub fn from_env() -> Self {
        match std::env::var("OLLAMA_HOST") {
            Ok(host) if !host.trim().is_empty() => Self::from_host(&host),
            _ => Self::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_HOST.to_string(),
            // Large models take a while to load on first request.
            timeout: Duration::from_secs(300),
        }
    }
}

fn normalize_host(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_scheme() {
        assert_eq!(normalize_host("127.0.0.1:11434"), "http://127.0.0.1:11434");
        assert_eq!(normalize_host("https://gpu-box:443"), "https://gpu-box:443");
        assert_eq!(OllamaConfig::from_host(" gpu-box:11434 ").base_url, "http://gpu-box:11434");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(
            OllamaConfig::new("http://localhost:11434/").base_url,
            "http://localhost:11434"
        );
    }

    #[test]
    fn summarization_preset() {
        let config = GenerationConfig::summarization();
        assert_eq!(config.max_length, 200);
        assert_eq!(config.min_length, 30);
        assert_eq!(config.no_repeat_ngram_size, 3);
        assert!(config.temperature.is_none());
    }
}
