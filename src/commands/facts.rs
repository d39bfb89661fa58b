use std::path::PathBuf;

use clap::Args;
use coach::pipelines::retrieval_pipeline::{FactStore, OllamaEmbedder, RetrievalPipelineBuilder};
use coach::pipelines::text_generation_pipeline::OllamaClient;

use super::{data, Globals};

#[derive(Args)]
pub struct StoreArgs {
    /// Ollama model used for embeddings.
    #[arg(short, long, default_value = "llama3")]
    model: String,

    #[arg(short, long, default_value = "michael_jordan_facts")]
    collection: String,

    /// Directory holding the fact collections.
    #[arg(long, default_value = "team_facts.db")]
    db: PathBuf,
}

#[derive(Args)]
pub struct LoadFactsArgs {
    #[command(flatten)]
    store: StoreArgs,
}

pub async fn load(args: LoadFactsArgs, globals: &Globals) -> anyhow::Result<()> {
    let StoreArgs { model, collection, db } = args.store;
    let embedder = OllamaEmbedder::new(OllamaClient::new(globals.ollama.clone())?, &model);

    let mut store = FactStore::open(&db, &collection)?;
    let added = store.add_texts(&embedder, &data::MICHAEL_JORDAN_FACTS).await?;
    store.save()?;
    tracing::info!(added, collection = store.name(), "loaded facts");
    Ok(())
}

#[derive(Args)]
pub struct AskFactsArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Ollama model that writes the answer.
    #[arg(long, default_value = "llama3")]
    generation_model: String,

    #[arg(default_value = "What is Michael Jordan known for?")]
    query: String,
}

pub async fn ask(args: AskFactsArgs, globals: &Globals) -> anyhow::Result<()> {
    let StoreArgs { model, collection, db } = args.store;
    let pipeline = RetrievalPipelineBuilder::new(db, &collection)
        .embedding_model(&model)
        .generation_model(&args.generation_model)
        .ollama_config(globals.ollama.clone())
        .build()
        .await?;
    if pipeline.store().is_empty() {
        tracing::warn!(%collection, "fact store is empty, run load-facts first");
    }

    let response = pipeline.invoke(&args.query).await?;
    if globals.verbose >= 2 {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.answer);
    }
    Ok(())
}
