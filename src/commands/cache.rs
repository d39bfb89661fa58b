use std::time::Duration;

use clap::{ArgAction, Args};
use coach::loaders::snapshot_download;
use coach::pipelines::text_generation_pipeline::OllamaClient;

use super::Globals;

/// Hub repositories fetched by `cache`.
pub const HUB_MODELS: [&str; 12] = [
    "distilbert/distilbert-base-uncased",
    "google-t5/t5-small",
    "MaartenGr/BERTopic_Wikipedia",
    "sentence-transformers/all-MiniLM-L6-v2",
    "sentence-transformers/multi-qa-MiniLM-L6-cos-v1",
    "sentence-transformers/sentence-t5-xxl",
    "tomaarsen/span-marker-xlm-roberta-base-fewnerd-fine-super",
    "tomaarsen/span-marker-bert-base-fewnerd-fine-super",
    "bert-base-cased",
    "xlm-roberta-base",
    "meta-llama/Meta-Llama-3-8B-Instruct",
    "dslim/bert-base-NER",
];

/// Ollama models and their approximate download size.
pub const OLLAMA_MODELS: [(&str, &str); 4] = [
    ("llama3", "4.7 GB"),
    ("llama3:8b", "4.7 GB"),
    ("llama3:70b", "39 GB"),
    ("llama3.1", "4.9 GB"),
];

const PULL_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Args)]
pub struct CacheArgs {
    /// Quieter output; each -q cancels one -v.
    #[arg(short, long, action = ArgAction::Count)]
    quiet: u8,

    /// Token for gated repositories such as Meta-Llama-3.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

/// Starts at 1; `-v` raises it and `-q` lowers it.
pub fn log_level(verbose: u8, quiet: u8) -> i32 {
    1 + i32::from(verbose) - i32::from(quiet)
}

pub async fn run(args: CacheArgs, globals: &Globals) -> anyhow::Result<()> {
    let level = log_level(globals.verbose, args.quiet);
    if args.token.is_none() {
        tracing::warn!("HF_TOKEN is not set, gated models will fail to download");
    }

    for model in HUB_MODELS {
        if level > 0 {
            println!("Downloading model: {model}");
        }
        let token = args.token.clone();
        let files = tokio::task::spawn_blocking(move || snapshot_download(model, token)).await??;
        tracing::info!(model, files = files.len(), "cached hub model");
    }

    let client = OllamaClient::new(globals.ollama.clone().with_timeout(PULL_TIMEOUT))?;
    for (model, size) in OLLAMA_MODELS {
        if level > 0 {
            println!("Downloading Ollama model (approx {size}): {model}");
        }
        let status = client.pull(model).await?;
        tracing::info!(model, %status, "pulled ollama model");
    }
    Ok(())
}
