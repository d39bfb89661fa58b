use clap::Args;
use coach::pipelines::text_generation_pipeline::TextGenerationPipelineBuilder;
use coach::Message;

use super::Globals;

pub const SUPPORTED_MODELS: [&str; 3] = ["llama3", "llama3:8b", "llama3:70b"];

const SYSTEM_PROMPT: &str = "Give a one or two word answers only.";

#[derive(Args)]
pub struct AskArgs {
    #[arg(short, long, default_value = "llama3")]
    model: String,

    #[arg(default_value = "What is capital of America?")]
    query: String,
}

pub async fn run(args: AskArgs, globals: &Globals) -> anyhow::Result<()> {
    let pipeline = TextGenerationPipelineBuilder::ollama(&args.model)
        .supported_models(SUPPORTED_MODELS)
        .ollama_config(globals.ollama.clone())
        .build()
        .await?;

    let messages = vec![Message::system(SYSTEM_PROMPT), Message::user(&args.query)];
    println!("{}", pipeline.completion(&messages).await?);
    Ok(())
}
