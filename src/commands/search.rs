use std::path::PathBuf;

use clap::Args;
use coach::pipelines::embedding_pipeline::EmbeddingPipelineBuilder;
use coach::pipelines::semantic_search::{DocumentIndex, IntentLibrary, SemanticSearchPipeline};

use super::{data, Globals};

const QA_MODEL: &str = "sentence-transformers/multi-qa-MiniLM-L6-cos-v1";
const MINILM_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

const DOCS_PATH: &str = "team_messages.json";
const EMBEDDINGS_PATH: &str = "team_messages_embeddings.csv";

const TOP_K: usize = 5;
/// Hits at or below this cosine score are not worth reporting.
const MIN_SCORE: f32 = 0.2;

#[derive(Args)]
pub struct SearchArgs {
    /// Sentence-transformers model, hub id or local directory.
    #[arg(short, long, default_value = QA_MODEL)]
    model: String,

    #[arg(default_value = "Pass the ball to John when he is near the basket.")]
    query: String,
}

pub async fn search(args: SearchArgs, globals: &Globals) -> anyhow::Result<()> {
    let embedder = globals
        .on_device(EmbeddingPipelineBuilder::sentence_transformer(&args.model))
        .build()
        .await?;

    if globals.verbose >= 2 {
        println!("{:?}", embedder.embed(&args.query)?);
        println!("{:?}", embedder.embed_batch(&data::PLAY_DOCS)?);
    }

    let search = SemanticSearchPipeline::new(&embedder);
    for (doc, score) in search.rank_documents(&args.query, &data::PLAY_DOCS)? {
        println!("{score} {doc}");
    }
    Ok(())
}

#[derive(Args)]
pub struct IntentArgs {
    #[arg(short, long, default_value = QA_MODEL)]
    model: String,

    /// Message to classify.
    query: String,
}

fn basketball_intents() -> IntentLibrary {
    IntentLibrary::new()
        .with_intent("TRAVEL", data::TRAVEL_PHRASES)
        .with_intent("PASS", data::PASS_PHRASES)
        .with_intent("SHOOT", data::SHOOT_PHRASES)
}

pub async fn intent(args: IntentArgs, globals: &Globals) -> anyhow::Result<()> {
    let embedder = globals
        .on_device(EmbeddingPipelineBuilder::sentence_transformer(&args.model))
        .build()
        .await?;

    for found in basketball_intents().get_intent(&args.query, &embedder)? {
        println!("{} {} {}", found.score, found.intent, found.phrase);
    }
    Ok(())
}

#[derive(Args)]
pub struct IndexDocsArgs {
    #[arg(short, long, default_value = MINILM_MODEL)]
    model: String,

    /// Where the documents are written as JSON.
    #[arg(short, long, default_value = DOCS_PATH)]
    docs: PathBuf,

    /// Where the embeddings are written as CSV.
    #[arg(short, long, default_value = EMBEDDINGS_PATH)]
    embeddings: PathBuf,
}

pub async fn index_docs(args: IndexDocsArgs, globals: &Globals) -> anyhow::Result<()> {
    let embedder = globals
        .on_device(EmbeddingPipelineBuilder::sentence_transformer(&args.model))
        .build()
        .await?;

    let documents = data::TEAM_MESSAGES.iter().map(|d| d.to_string()).collect();
    let index = SemanticSearchPipeline::new(&embedder).index(documents)?;
    index.save(&args.docs, &args.embeddings)
}

#[derive(Args)]
pub struct SearchDocsArgs {
    #[arg(short, long, default_value = MINILM_MODEL)]
    model: String,

    #[arg(short, long, default_value = DOCS_PATH)]
    docs: PathBuf,

    #[arg(short, long, default_value = EMBEDDINGS_PATH)]
    embeddings: PathBuf,

    #[arg(default_value = "Did you see him slam dunk?")]
    content: String,
}

pub async fn search_docs(args: SearchDocsArgs, globals: &Globals) -> anyhow::Result<()> {
    let index = DocumentIndex::load(&args.docs, &args.embeddings)?;
    let embedder = globals
        .on_device(EmbeddingPipelineBuilder::sentence_transformer(&args.model))
        .build()
        .await?;

    let hits = SemanticSearchPipeline::new(&embedder).search(&index, &args.content, TOP_K)?;
    tracing::debug!(?hits, "document hits");
    match hits.first() {
        Some((hit, doc)) if hit.score > MIN_SCORE => println!("{:.4} {doc}", hit.score),
        _ => println!("no results"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_holds_every_phrase() {
        let library = basketball_intents();
        assert_eq!(library.intents().collect::<Vec<_>>(), vec!["TRAVEL", "PASS", "SHOOT"]);
        assert_eq!(library.phrases().len(), 10);
    }
}
