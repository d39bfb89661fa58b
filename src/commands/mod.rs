pub mod answer;
pub mod ask;
pub mod cache;
pub mod data;
pub mod entities;
pub mod facts;
pub mod search;
pub mod summarize;
pub mod topic;
pub mod weather;

use clap::Subcommand;
use coach::pipelines::utils::DeviceSelectable;
use coach::OllamaConfig;

/// Flags every subcommand sees.
#[derive(Debug, Clone)]
pub struct Globals {
    pub verbose: u8,
    pub cpu: bool,
    pub ollama: OllamaConfig,
}

impl Globals {
    /// Apply `--cpu` to a pipeline builder.
    pub fn on_device<B: DeviceSelectable>(&self, builder: B) -> B {
        if self.cpu {
            builder.cpu()
        } else {
            builder
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank the fixed plays against a relayed message.
    Search(search::SearchArgs),

    /// Classify a message as TRAVEL, PASS or SHOOT.
    Intent(search::IntentArgs),

    /// Embed the basketball passages and write them to disk.
    IndexDocs(search::IndexDocsArgs),

    /// Find the passage closest to a message.
    SearchDocs(search::SearchDocsArgs),

    /// Answer a question from a context with a fine-tuned checkpoint.
    Answer(answer::AnswerArgs),

    /// Summarize a bill with a fine-tuned checkpoint.
    Summarize(summarize::SummarizeArgs),

    /// Assign a BERTopic topic to a message.
    Topic(topic::TopicArgs),

    /// Extract named entities from a message.
    Entities(entities::EntitiesArgs),

    /// Ask a Llama 3 model served by Ollama.
    Ask(ask::AskArgs),

    /// Embed the Michael Jordan facts into a fact store.
    LoadFacts(facts::LoadFactsArgs),

    /// Answer a question from the fact store.
    AskFacts(facts::AskFactsArgs),

    /// Ask an agent that can look up the current weather.
    Weather(weather::WeatherArgs),

    /// Download every model the other commands use.
    Cache(cache::CacheArgs),
}

pub async fn run(command: Command, globals: &Globals) -> anyhow::Result<()> {
    match command {
        Command::Search(args) => search::search(args, globals).await,
        Command::Intent(args) => search::intent(args, globals).await,
        Command::IndexDocs(args) => search::index_docs(args, globals).await,
        Command::SearchDocs(args) => search::search_docs(args, globals).await,
        Command::Answer(args) => answer::run(args, globals).await,
        Command::Summarize(args) => summarize::run(args, globals).await,
        Command::Topic(args) => topic::run(args, globals).await,
        Command::Entities(args) => entities::run(args, globals).await,
        Command::Ask(args) => ask::run(args, globals).await,
        Command::LoadFacts(args) => facts::load(args, globals).await,
        Command::AskFacts(args) => facts::ask(args, globals).await,
        Command::Weather(args) => weather::run(args, globals).await,
        Command::Cache(args) => cache::run(args, globals).await,
    }
}
