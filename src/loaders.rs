//! Locating and loading model files.
//!
//! Every pipeline takes a [`ModelSource`]: either a Hugging Face hub
//! repository or a local directory such as a fine-tuning checkpoint. The
//! loaders below turn a source into tokenizers, parsed JSON configs and
//! `VarBuilder`s.

use std::fmt;
use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::{ApiBuilder, ApiError, ApiRepo};
use serde::de::DeserializeOwned;
use tokenizers::Tokenizer;

use crate::core::{CoachError, ModelOptions};

/// Where a model's files come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelSource {
    /// A repository on the Hugging Face hub, e.g. `google-t5/t5-small`.
    Hub(String),
    /// A directory on disk holding `config.json`, weights and `tokenizer.json`.
    Local(PathBuf),
}

impl ModelSource {
    pub fn hub(repo: &str) -> Self {
        Self::Hub(repo.to_string())
    }

    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self::Local(dir.into())
    }

    /// The `./{directory}/checkpoint-{checkpoint}/` layout a training run leaves behind.
    pub fn checkpoint(directory: &str, checkpoint: &str) -> Self {
        Self::Local(
            Path::new(".")
                .join(directory)
                .join(format!("checkpoint-{checkpoint}")),
        )
    }

    /// Interpret a user-supplied model name.
    ///
    /// Existing directories and anything that looks like a path are local,
    /// everything else is a hub repository id.
    pub fn parse(name: &str) -> Self {
        let path = Path::new(name);
        if path.is_dir() || name.starts_with('.') || name.starts_with('/') {
            Self::Local(path.to_path_buf())
        } else {
            Self::Hub(name.to_string())
        }
    }

    /// Resolve `filename` to a path on disk, downloading it if needed.
    pub fn get(&self, filename: &str) -> anyhow::Result<PathBuf> {
        match self {
            Self::Hub(repo) => HfLoader::new(repo, filename).load(),
            Self::Local(dir) => {
                let path = dir.join(filename);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(CoachError::MissingFile { path }.into())
                }
            }
        }
    }

    /// Like [`ModelSource::get`] for files a model may or may not ship.
    ///
    /// `Ok(None)` only when the file is known to be absent: missing from the
    /// local directory, or not listed in the hub repository. Network and
    /// authentication failures are errors.
    pub fn get_optional(&self, filename: &str) -> anyhow::Result<Option<PathBuf>> {
        match self {
            Self::Hub(repo) => HfLoader::new(repo, filename).load_optional(),
            Self::Local(dir) => {
                let path = dir.join(filename);
                Ok(path.is_file().then_some(path))
            }
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hub(repo) => write!(f, "{repo}"),
            Self::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

impl ModelOptions for ModelSource {
    fn cache_key(&self) -> String {
        match self {
            Self::Hub(repo) => format!("hub:{repo}"),
            Self::Local(dir) => format!("local:{}", dir.display()),
        }
    }
}

/// Fetches a single file from a hub repository into the local hub cache.
///
/// Honours `HF_HOME` and `HF_ENDPOINT` like the Python hub client.
#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
    pub endpoint: Option<String>,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    fn api(&self) -> anyhow::Result<ApiRepo> {
        let mut builder = ApiBuilder::from_env();
        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint.clone());
        }
        Ok(builder.build()?.model(self.repo.clone()))
    }

    pub fn load(&self) -> anyhow::Result<PathBuf> {
        Ok(self.fetch(&self.api()?)?)
    }

    /// `Ok(None)` when the repository listing does not contain the file.
    pub fn load_optional(&self) -> anyhow::Result<Option<PathBuf>> {
        let api = self.api()?;
        match self.fetch(&api) {
            Ok(path) => Ok(Some(path)),
            Err(fetch_err) => match api.info() {
                Ok(info) if !info.siblings.iter().any(|s| s.rfilename == self.filename) => {
                    tracing::debug!(repo = %self.repo, file = %self.filename, "optional file not in repository");
                    Ok(None)
                }
                _ => Err(fetch_err.into()),
            },
        }
    }

    fn fetch(&self, api: &ApiRepo) -> Result<PathBuf, ApiError> {
        // Concurrent processes fight over the hub cache lock; back off and retry.
        let max_retries = 3;
        let mut attempt = 0;
        loop {
            match api.get(&self.filename) {
                Ok(path) => return Ok(path),
                Err(e) if e.to_string().contains("Lock acquisition failed") && attempt + 1 < max_retries => {
                    let wait = std::time::Duration::from_millis(100 * (1 << attempt));
                    tracing::warn!(repo = %self.repo, file = %self.filename, "hub cache locked, retrying in {wait:?}");
                    std::thread::sleep(wait);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub source: ModelSource,
}

impl TokenizerLoader {
    pub fn new(source: &ModelSource) -> Self {
        Self {
            source: source.clone(),
        }
    }

    pub fn load(&self) -> anyhow::Result<Tokenizer> {
        let path = self.source.get("tokenizer.json")?;
        Tokenizer::from_file(path).map_err(anyhow::Error::msg)
    }
}

/// Reads a JSON file from a model source into `T`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub source: ModelSource,
    pub filename: String,
}

impl ConfigLoader {
    pub fn new(source: &ModelSource, filename: &str) -> Self {
        Self {
            source: source.clone(),
            filename: filename.to_string(),
        }
    }

    pub fn load<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        let path = self.source.get(&self.filename)?;
        read_json(&path)
    }

    /// `Ok(None)` when the file does not exist, an error when it cannot be
    /// fetched or does not parse.
    pub fn load_optional<T: DeserializeOwned>(&self) -> anyhow::Result<Option<T>> {
        self.source
            .get_optional(&self.filename)?
            .map(|path| read_json(&path))
            .transpose()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))
}

/// Opens model weights, preferring safetensors over pickled PyTorch files.
#[derive(Debug, Clone)]
pub struct WeightsLoader {
    pub source: ModelSource,
}

impl WeightsLoader {
    pub fn new(source: &ModelSource) -> Self {
        Self {
            source: source.clone(),
        }
    }

    pub fn load(&self, dtype: DType, device: &Device) -> anyhow::Result<VarBuilder<'static>> {
        let weights = match self.source.get("model.safetensors") {
            Ok(path) => path,
            Err(safetensors_err) => self.source.get("pytorch_model.bin").map_err(|_| {
                anyhow::anyhow!(
                    "Model weights not found in {}. Expected `model.safetensors` or `pytorch_model.bin`: {safetensors_err}",
                    self.source
                )
            })?,
        };
        tracing::debug!(path = %weights.display(), "loading weights");

        let vb = if weights.extension().is_some_and(|ext| ext == "safetensors") {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights], dtype, device)? }
        } else {
            VarBuilder::from_pth(&weights, dtype, device)?
        };
        Ok(vb)
    }
}

/// Download every file of a hub repository, like `huggingface_hub.snapshot_download`.
pub fn snapshot_download(repo: &str, token: Option<String>) -> anyhow::Result<Vec<PathBuf>> {
    let api = ApiBuilder::new()
        .with_token(token)
        .with_progress(false)
        .build()?
        .model(repo.to_string());

    let info = api.info()?;
    let mut files = Vec::with_capacity(info.siblings.len());
    for sibling in &info.siblings {
        tracing::debug!(repo, file = %sibling.rfilename, "fetching");
        files.push(api.get(&sibling.rfilename)?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_layout() {
        let source = ModelSource::checkpoint("team_knowledge_base", "1500");
        assert_eq!(
            source,
            ModelSource::Local(PathBuf::from("./team_knowledge_base/checkpoint-1500"))
        );
    }

    #[test]
    fn parse_distinguishes_paths_from_repos() {
        assert_eq!(
            ModelSource::parse("sentence-transformers/all-MiniLM-L6-v2"),
            ModelSource::hub("sentence-transformers/all-MiniLM-L6-v2")
        );
        assert!(matches!(ModelSource::parse("./team_legal/checkpoint-2000"), ModelSource::Local(_)));
        assert!(matches!(ModelSource::parse("/models/t5"), ModelSource::Local(_)));
    }

    #[test]
    fn local_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = ModelSource::local(dir.path());

        let err = source.get("config.json").unwrap_err();
        let coach_err = err.downcast_ref::<CoachError>().unwrap();
        assert!(matches!(coach_err, CoachError::MissingFile { path } if path.ends_with("config.json")));
        assert!(source.get_optional("config.json").unwrap().is_none());
    }

    #[test]
    fn config_loader_reads_local_json() {
        #[derive(serde::Deserialize)]
        struct Pooling {
            pooling_mode_mean_tokens: bool,
        }

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pooling.json"),
            r#"{"word_embedding_dimension": 384, "pooling_mode_mean_tokens": true}"#,
        )
        .unwrap();
        let source = ModelSource::local(dir.path());

        let pooling: Pooling = ConfigLoader::new(&source, "pooling.json").load().unwrap();
        assert!(pooling.pooling_mode_mean_tokens);

        let absent: Option<Pooling> = ConfigLoader::new(&source, "modules.json")
            .load_optional()
            .unwrap();
        assert!(absent.is_none());
    }

    #[test]
    fn unreachable_hub_is_an_error_not_a_missing_file() {
        // nothing listens on the discard port
        let loader = HfLoader::new("coach-tests/never-cached", "modules.json")
            .with_endpoint("http://127.0.0.1:9");
        assert!(loader.load_optional().is_err());
        assert!(loader.load().is_err());
    }

    #[test]
    fn config_loader_reports_unparseable_optional_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modules.json"), "not json").unwrap();
        let source = ModelSource::local(dir.path());

        let result = ConfigLoader::new(&source, "modules.json").load_optional::<serde_json::Value>();
        assert!(result.is_err());
    }

    #[test]
    fn cache_keys_separate_hub_and_local() {
        assert_ne!(
            ModelSource::hub("t5-small").cache_key(),
            ModelSource::local("t5-small").cache_key()
        );
    }
}
